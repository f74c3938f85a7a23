//! End-to-end scenarios across several handlers

pub mod complete_user_journey_test;
pub mod dispatch_test;
