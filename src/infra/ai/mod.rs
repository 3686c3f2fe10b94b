pub mod mock_insights;
