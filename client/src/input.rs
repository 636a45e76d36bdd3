//! Keyboard-style input mapping for the terminal client

use shared::{Command, Direction};

/// What the user asked for on one line of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Send(Command),
    Quit,
}

/// Maps one line of user input to an action.
///
/// Supports WASD, arrow words, and raw protocol commands. Empty lines poll the server.
pub fn parse_input(line: &str) -> InputAction {
    let key = line.trim().to_ascii_lowercase();
    match key.as_str() {
        "" | "p" | "ping" => InputAction::Send(Command::Ping),
        "w" | "up" => InputAction::Send(Command::Move(Direction::Up)),
        "s" | "down" => InputAction::Send(Command::Move(Direction::Down)),
        "a" | "left" => InputAction::Send(Command::Move(Direction::Left)),
        "d" | "right" => InputAction::Send(Command::Move(Direction::Right)),
        "r" | "restart" => InputAction::Send(Command::Restart),
        "q" | "quit" | "exit" => InputAction::Quit,
        other => InputAction::Send(Command::parse(other)),
    }
}
