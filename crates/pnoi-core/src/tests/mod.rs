mod command;
mod wifi;
