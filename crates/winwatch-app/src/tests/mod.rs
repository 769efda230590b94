mod status_tests;
