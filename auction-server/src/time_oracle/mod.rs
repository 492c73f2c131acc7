pub mod api;
pub mod entities;
pub mod reconciler;
pub mod repository;
pub mod service;
pub mod source;
