// src/core/mod.rs

pub mod ftp;
pub mod html;
pub mod sanitize;
