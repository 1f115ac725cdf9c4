// Interface adapters: bingo client, token verifier and the console view.

pub mod clients;
pub mod commands;
pub mod console;
pub mod page;
pub mod protocol;
pub mod state;
pub mod token;
