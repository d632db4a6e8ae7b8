mod audit_tests;
