//! Shell completions generation.

use clap_complete::Shell;

pub fn run(shell: Shell) {
    let mut cmd = <super::Cli as clap::CommandFactory>::command();
    clap_complete::generate(shell, &mut cmd, "less-sprites", &mut std::io::stdout());
}
