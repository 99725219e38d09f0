pub mod chat;
pub mod health;
pub mod menu;
pub mod recommend;
