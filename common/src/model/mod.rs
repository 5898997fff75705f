pub mod action;
pub mod attachment;
pub mod form;
pub mod form_kind;
pub mod lecture;
pub mod personal_info;
pub mod progress;
pub mod record;
pub mod teacher;
pub mod trainer;
pub mod user;
pub mod vacancy;
