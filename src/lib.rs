pub mod config;
pub mod error;
pub mod handler;
pub mod hours;
pub mod local_time;
pub mod memory;
pub mod menus;
pub mod model;
pub mod search;
pub mod status;
pub mod store;
pub mod supabase;
pub mod tags;
pub mod trending;
