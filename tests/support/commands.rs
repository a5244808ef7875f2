//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a passdig command isolated from the user's environment.
    ///
    /// Returns a Command configured with:
    /// - HOME and the config dir inside the temporary home directory
    /// - PASSWORD_STORE_DIR pointing at the test store
    /// - colors and inherited passdig settings disabled
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("passdig").expect("failed to find passdig binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("PASSWORD_STORE_DIR", self.store.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("PASSDIG_CONFIG");
        cmd.env_remove("PASSDIG_LOG");
        cmd.current_dir(self.home.path());
        cmd
    }

    /// Shortcut for `passdig search`.
    pub fn search(&self, query: &str) -> Output {
        self.cmd()
            .args(["search", query])
            .output()
            .expect("failed to run passdig search")
    }

    /// Shortcut for `passdig ls`.
    pub fn ls(&self) -> Output {
        self.cmd()
            .arg("ls")
            .output()
            .expect("failed to run passdig ls")
    }

    /// Shortcut for `passdig show --key FILE` with the passphrase on stdin.
    pub fn show(&self, entry: &str, key_file: &std::path::Path, passphrase: &str) -> Output {
        self.cmd()
            .args(["show", entry, "--key"])
            .arg(key_file)
            .write_stdin(format!("{}\n", passphrase))
            .output()
            .expect("failed to run passdig show")
    }
}
