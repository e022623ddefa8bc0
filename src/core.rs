pub mod clipboard;
pub mod controller;
pub mod features;
pub mod form;
pub mod notification;
pub mod store;
