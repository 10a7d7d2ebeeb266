//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::QuicktaskError;

/// Execute the completions command.
///
/// # Errors
///
/// Returns an error if the shell name is unknown or the script is not UTF-8.
pub fn completions(shell: &str, install: bool) -> Result<String, QuicktaskError> {
    let shell_type = shell_from_str(shell).ok_or_else(|| {
        QuicktaskError::InvalidArgument(format!(
            "Unknown shell: {shell}. Supported: bash, zsh, fish, powershell, elvish"
        ))
    })?;

    if install {
        Ok(completion_install_instructions(shell_type))
    } else {
        generate_completions(shell_type)
    }
}

/// Generate the completion script for `shell`.
fn generate_completions(shell: Shell) -> Result<String, QuicktaskError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "quicktask", &mut buf);
    String::from_utf8(buf).map_err(|e| QuicktaskError::InvalidArgument(format!("UTF-8 error: {e}")))
}

fn shell_from_str(s: &str) -> Option<Shell> {
    match s.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "powershell" | "ps" | "pwsh" => Some(Shell::PowerShell),
        "elvish" => Some(Shell::Elvish),
        _ => None,
    }
}

fn completion_install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => r"# Add to ~/.bashrc or ~/.bash_profile:
source <(quicktask completions bash)
"
        .to_string(),

        Shell::Zsh => r"# Save to your fpath:
quicktask completions zsh > ~/.zsh/completions/_quicktask
# Then add to ~/.zshrc (before compinit):
fpath=(~/.zsh/completions $fpath)
"
        .to_string(),

        Shell::Fish => r"# Save to fish completions directory:
quicktask completions fish > ~/.config/fish/completions/quicktask.fish
"
        .to_string(),

        Shell::PowerShell => r"# Add to your PowerShell profile ($PROFILE):
quicktask completions powershell | Out-String | Invoke-Expression
"
        .to_string(),

        Shell::Elvish => r"# Save to elvish completions directory:
quicktask completions elvish > ~/.elvish/lib/quicktask.elv
"
        .to_string(),

        _ => "Unknown shell".to_string(),
    }
}
