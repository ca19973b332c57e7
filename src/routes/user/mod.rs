pub mod info;
pub mod onboarding;
