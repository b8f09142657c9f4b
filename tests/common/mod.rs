#![allow(dead_code)]

pub mod mock_gl;
pub mod test_utils;
