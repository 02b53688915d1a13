//! Core library for the fitbot fitness tracker: the built-in nutrition table,
//! data model, SQLite store and the service layer that ties them together.

pub mod db;
pub mod export;
pub mod models;
pub mod nutrition;
pub mod service;
