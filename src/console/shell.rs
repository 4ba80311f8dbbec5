//! Read-eval-print loop over a [`Dapp`].

use alloy::primitives::hex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::console::command::{help_text, parse_line, Command};
use crate::session::{Dapp, SessionError};

const PROMPT: &str = "greeter> ";

/// Read commands from `input` until `quit` or end of input.
pub async fn run<R, W>(dapp: &Dapp, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    output.write_all(PROMPT.as_bytes()).await?;
    output.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let reply = match parse_line(&line) {
            Ok(None) => String::new(),
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => execute(dapp, command).await,
            Err(usage) => usage,
        };

        if !reply.is_empty() {
            output.write_all(reply.as_bytes()).await?;
            if !reply.ends_with('\n') {
                output.write_all(b"\n").await?;
            }
        }
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;
    }

    output.write_all(b"\n").await?;
    output.flush().await
}

/// Run one command and render its outcome.
pub async fn execute(dapp: &Dapp, command: Command) -> String {
    let network = &dapp.config().network;

    match command {
        Command::Login => match dapp.login().await {
            Ok(address) => format!("Logged in as {}", address),
            Err(e) => format!("Error: {}", e),
        },
        Command::UserInfo => match dapp.get_user_info().await {
            Ok(info) => serde_json::to_string_pretty(&info)
                .unwrap_or_else(|e| format!("Error: cannot render user info: {}", e)),
            Err(e) => format!("Error: {}", e),
        },
        Command::Logout => match dapp.logout().await {
            Ok(()) => "Logged out".to_string(),
            Err(e) => format!("Error: {}", e),
        },
        Command::Deploy => match dapp.deploy_contract().await {
            Ok(contract) => format!(
                "Contract deployed at {}\n  {}",
                contract.address, contract.explorer_url
            ),
            Err(e) => format!("Error: {}", e),
        },
        Command::Read => match dapp.read_contract().await {
            Ok(message) => format!("Message: {}", message),
            Err(e) => format!("Error: {}", e),
        },
        Command::Input { text } => {
            dapp.set_pending_input(text.clone()).await;
            format!("Pending input: {}", text)
        }
        Command::Write { text } => {
            if let Some(text) = text {
                dapp.set_pending_input(text).await;
            }
            match dapp.write_contract().await {
                Ok(tx_hash) => format!("Message updated in {}\n  {}", tx_hash, network.tx_url(tx_hash)),
                Err(e) => format!("Error: {}", e),
            }
        }
        Command::Balance => match dapp.check_balance().await {
            Ok(snapshot) => format!(
                "Address: {}\nChain:   {} ({})\nBalance: {} {}",
                snapshot.address,
                snapshot.chain_id,
                network.display_name,
                snapshot.balance_ether(),
                network.ticker
            ),
            Err(e) => format!("Error: {}", e),
        },
        Command::Sign { text } => match dapp.sign_message(&text).await {
            Ok(signature) => format!("Signature: {}", hex::encode_prefixed(signature.as_bytes())),
            Err(e) => format!("Error: {}", e),
        },
        Command::Status => status(dapp).await,
        Command::Help => help_text(),
        Command::Quit => String::new(),
    }
}

/// Startup message for a session that failed to initialize.
pub fn init_failure_notice(error: &SessionError) -> String {
    format!(
        "Session initialization failed: {}\n\
         Check the [network] and [login] config sections and restart; \
         `status` shows the current state.",
        error
    )
}

async fn status(dapp: &Dapp) -> String {
    let mut lines = vec![format!("Stage:     {}", dapp.stage().await)];
    if let Some(id) = dapp.session_id().await {
        lines.push(format!("Session:   {}", id));
    }
    if let Some(address) = dapp.connected_address().await {
        lines.push(format!("Wallet:    {}", address));
    }
    if let Some(contract) = dapp.contract().await {
        lines.push(format!("Contract:  {}", contract.address));
    }
    lines.push(format!("Displayed: {}", dapp.displayed_message().await));
    lines.push(format!("Pending:   {}", dapp.pending_input().await));
    lines.join("\n")
}
