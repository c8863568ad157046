mod activity_service_test;
mod question_service_test;
