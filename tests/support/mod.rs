#![allow(dead_code)]

pub mod class_tree;
