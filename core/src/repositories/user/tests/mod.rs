mod mock_tests;
