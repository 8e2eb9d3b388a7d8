//! Regulation chat.

use color_eyre::Result;
use lexlogic_core::client::ChatApi;
use lexlogic_core::models::{Agent, ChatMessage, FragmentId};
use lexlogic_core::ChatThread;

use crate::output::{dimmed, heading, print_error, print_info, spinner};

/// Print the thread, or send `message` first when it is not empty.
pub async fn execute<C: ChatApi>(api: C, fragment: FragmentId, message: String) -> Result<()> {
    let mut thread = ChatThread::new(api, fragment);

    if message.trim().is_empty() {
        let messages = thread.load().await?;
        if messages.is_empty() {
            print_info("No messages yet");
        }
        for message in messages {
            print_message(message);
        }
        return Ok(());
    }

    thread.load().await?;
    let before = thread.messages().len();

    let pb = spinner("Waiting for the agent...");
    let result = thread.send(message.trim()).await;
    pb.finish_and_clear();

    if let Err(e) = result {
        print_error(&format!("Message not sent: {}", e));
        return Err(e.into());
    }

    // The sent message and whatever the agent replied.
    for message in thread.messages().iter().skip(before) {
        print_message(message);
    }
    Ok(())
}

fn print_message(message: &ChatMessage) {
    let who = match message.agent {
        Agent::User => "you",
        Agent::Agent => "agent",
    };
    println!(
        "{} {}",
        heading(who),
        dimmed(&message.created_at.format("%Y-%m-%d %H:%M").to_string())
    );
    println!("{}", message.content);
    println!();
}
