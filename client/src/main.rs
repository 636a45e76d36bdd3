use clap::Parser;
use client::input::{parse_input, InputAction};
use client::network::GameClient;
use client::rendering::Renderer;
use log::info;
use shared::{Command, GRID_SIZE};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:8080")]
    server: String,

    /// Board size; must match the server's
    #[arg(short = 'g', long, default_value_t = GRID_SIZE)]
    grid_size: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    info!("Connecting to: {}", args.server);
    let mut client = GameClient::connect(&args.server).await?;
    let renderer = Renderer::new(args.grid_size);

    let view = client.send_command(Command::Hello).await?;
    println!("You are player {}", view.your_id);
    println!("Controls: w/a/s/d to move, r to restart, Enter to refresh, q to quit");
    print!("{}", renderer.render(&view));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_input(&line) {
            InputAction::Quit => break,
            InputAction::Send(command) => command,
        };

        let view = client.send_command(command).await?;
        print!("{}", renderer.render(&view));
    }

    Ok(())
}
