use anyhow::Result;
use clap::{Parser, Subcommand};

use daily::cli::{
    handle_encrypt_command, handle_note_command, handle_todo_command, handle_unlock_command,
    handle_workspace_command, Context, EncryptCommands, NoteCommands, TodoCommands,
    WorkspaceCommands,
};
use daily::error::DailyResult;

#[derive(Parser)]
#[command(
    name = "daily",
    version,
    about = "Todos and notes in your terminal, encrypted at rest",
    long_about = "Daily keeps todo lists and Markdown notes in plain workspace \
                  directories. Enable encryption for a workspace and every file \
                  in it is sealed with a key derived from your passphrase."
)]
struct Cli {
    /// Workspace to operate on (defaults to the configured default)
    #[arg(short, long, global = true)]
    workspace: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Todo list commands
    #[command(subcommand)]
    Todo(TodoCommands),

    /// Note commands
    #[command(subcommand)]
    Note(NoteCommands),

    /// Workspace registry commands
    #[command(subcommand)]
    Workspace(WorkspaceCommands),

    /// Encryption management commands
    #[command(subcommand)]
    Encrypt(EncryptCommands),

    /// Check the passphrase of an encrypted workspace
    Unlock,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = Context::load()?;
    let workspace = cli.workspace.as_deref();

    let result = match cli.command {
        Some(Commands::Todo(cmd)) => handle_todo_command(&mut ctx, workspace, cmd),
        Some(Commands::Note(cmd)) => handle_note_command(&mut ctx, workspace, cmd),
        Some(Commands::Workspace(cmd)) => handle_workspace_command(&mut ctx, cmd),
        Some(Commands::Encrypt(cmd)) => handle_encrypt_command(&mut ctx, workspace, cmd),
        Some(Commands::Unlock) => handle_unlock_command(&mut ctx, workspace),
        Some(Commands::Config) => show_config(&ctx, workspace),
        None => {
            println!("Daily - todos and notes in your terminal");
            println!();
            println!("Run 'daily --help' for usage information.");
            Ok(())
        }
    };

    ctx.close();
    result?;
    Ok(())
}

fn show_config(ctx: &Context, workspace: Option<&str>) -> DailyResult<()> {
    let current = ctx.workspace(workspace)?;
    println!("Daily Configuration");
    println!("===================");
    println!("Config directory: {}", ctx.paths.base_dir().display());
    println!("Settings file:    {}", ctx.paths.settings_file().display());
    println!("Audit log:        {}", ctx.paths.audit_log().display());
    println!();
    println!("Workspace:        {}", current.name());
    println!("Location:         {}", current.root().display());
    println!("Encrypted:        {}", current.is_encryption_enabled());
    println!("Editor:           {}", ctx.settings.editor_command());
    Ok(())
}
