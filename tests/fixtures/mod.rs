#![allow(dead_code)]

pub mod backend;
pub mod project;
pub mod tools;
