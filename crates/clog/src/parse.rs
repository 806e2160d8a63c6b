//! crates/clog/src/parse.rs
//! Key-filter flag parsing (`--log a,b+,bw,notime`).

use crate::logger::Logger;

/// Pseudo-key that disables color instead of enabling a key.
pub const NO_COLOR_FLAG: &str = "bw";
/// Pseudo-key that disables the timestamp instead of enabling a key.
pub const NO_TIME_FLAG: &str = "notime";

/// Iterates over the names a flag token enables.
///
/// A token without trailing `+` enables itself. A token such as `net++`
/// enables each name obtained by stripping one more `+`: `net+` and `net`.
/// The suffixed spelling is a request for the root keys and is not itself
/// registered.
fn enabled_names(token: &str) -> impl Iterator<Item = &str> {
    let own = (!token.ends_with('+')).then_some(token);
    let roots = std::iter::successors(token.strip_suffix('+'), |name| name.strip_suffix('+'));
    own.into_iter().chain(roots)
}

impl Logger {
    /// Parses a comma-separated flag list. An empty string does nothing.
    pub fn parse_log_flag(&self, flags: &str) {
        if flags.is_empty() {
            return;
        }
        let tokens: Vec<&str> = flags.split(',').collect();
        self.parse_log_flags(&tokens);
    }

    /// Applies each flag token in order, then logs the list at Normal level.
    ///
    /// `bw` disables color and `notime` disables the timestamp; every other
    /// token enables keys as described for trailing `+` suffixes.
    ///
    /// # Examples
    ///
    /// ```
    /// use clog::Logger;
    ///
    /// let logger = Logger::with_output(std::io::sink());
    /// logger.parse_log_flags(&["http", "disk+"]);
    /// assert_eq!(logger.enabled_keys(), ["disk", "http"]);
    /// ```
    pub fn parse_log_flags<S: AsRef<str>>(&self, flags: &[S]) {
        for token in flags.iter().map(AsRef::as_ref) {
            match token {
                NO_COLOR_FLAG => self.disable_color(),
                NO_TIME_FLAG => self.disable_time(),
                key => {
                    for name in enabled_names(key) {
                        self.enable_key(name);
                    }
                }
            }
        }
        let listed: Vec<&str> = flags.iter().map(AsRef::as_ref).collect();
        self.log(format_args!("Enabling logging: [{}]", listed.join(" ")));
    }
}
