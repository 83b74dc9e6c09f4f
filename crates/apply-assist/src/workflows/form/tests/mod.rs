mod choices;
mod common;
