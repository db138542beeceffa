mod common;
mod steps;
