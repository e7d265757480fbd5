//! Activation lines.
//!
//! A child process cannot change its parent shell's environment, so `kconf`
//! prints a statement for the shell to evaluate instead:
//!
//! ```sh
//! eval "$(kconf prod)"
//! ```

use std::path::Path;

use crate::paths::KUBECONFIG_VAR;

/// Shell syntax used for the activation line
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    /// sh, bash, zsh and friends: `export NAME=value`
    #[default]
    Posix,
    /// fish: `set -gx NAME value`
    Fish,
}

impl std::str::FromStr for Shell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "posix" | "sh" | "bash" | "zsh" => Ok(Self::Posix),
            "fish" => Ok(Self::Fish),
            _ => Err(format!("invalid shell: {}", s)),
        }
    }
}

impl Shell {
    /// Statement assigning KUBECONFIG to `path`
    pub fn activation_line(self, path: &Path) -> String {
        let value = self.quote(&path.to_string_lossy());
        match self {
            Self::Posix => format!("export {KUBECONFIG_VAR}={value}"),
            Self::Fish => format!("set -gx {KUBECONFIG_VAR} {value}"),
        }
    }

    /// Quote `value` only if it contains something the shell would interpret
    fn quote(self, value: &str) -> String {
        if !value.is_empty() && value.chars().all(is_plain) {
            return value.to_string();
        }

        match self {
            Self::Posix => format!("'{}'", value.replace('\'', r"'\''")),
            Self::Fish => format!("'{}'", value.replace('\\', r"\\").replace('\'', r"\'")),
        }
    }
}

fn is_plain(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | '+' | ':' | '@' | '%' | ',')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_parse() {
        assert_eq!("posix".parse::<Shell>().unwrap(), Shell::Posix);
        assert_eq!("zsh".parse::<Shell>().unwrap(), Shell::Posix);
        assert_eq!("Fish".parse::<Shell>().unwrap(), Shell::Fish);
        assert!("powershell".parse::<Shell>().is_err());
    }

    #[test]
    fn test_posix_line() {
        let line = Shell::Posix.activation_line(Path::new("/home/me/.kconf/cfg"));
        assert_eq!(line, "export KUBECONFIG=/home/me/.kconf/cfg");
    }

    #[test]
    fn test_fish_line() {
        let line = Shell::Fish.activation_line(Path::new("/home/me/.kconf/cfg"));
        assert_eq!(line, "set -gx KUBECONFIG /home/me/.kconf/cfg");
    }

    #[test]
    fn test_quoting() {
        let path = Path::new("/home/me/my configs/it's");
        assert_eq!(
            Shell::Posix.activation_line(path),
            r"export KUBECONFIG='/home/me/my configs/it'\''s'"
        );
        assert_eq!(
            Shell::Fish.activation_line(path),
            r"set -gx KUBECONFIG '/home/me/my configs/it\'s'"
        );
        assert_eq!(
            Shell::Posix.activation_line(Path::new("/tmp/$HOME")),
            "export KUBECONFIG='/tmp/$HOME'"
        );
    }
}
