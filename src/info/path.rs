use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Directories searched when none are configured and `INFOPATH` is unset.
pub const DEFAULT_INFO_DIRS: &[&str] = &["/usr/share/info", "/usr/local/share/info", "/usr/info"];

/// Search path used to turn a topic name into an Info file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoPath {
    dirs: Vec<PathBuf>,
}

impl Default for InfoPath {
    fn default() -> Self {
        Self::from_env()
    }
}

impl InfoPath {
    /// An explicit list of directories, searched in order.
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in default directories.
    pub fn system() -> Self {
        Self::new(DEFAULT_INFO_DIRS.iter().copied())
    }

    /// Read `INFOPATH`, falling back to [`InfoPath::system`].
    pub fn from_env() -> Self {
        match env::var_os("INFOPATH") {
            Some(value) => Self::parse(&value),
            None => Self::system(),
        }
    }

    /// Parse a colon separated list. An empty entry, such as a trailing
    /// colon, splices in the default directories at that point.
    pub fn parse(value: &OsStr) -> Self {
        let mut dirs = Vec::new();
        let mut spliced = false;
        for dir in env::split_paths(value) {
            if !dir.as_os_str().is_empty() {
                dirs.push(dir);
            } else if !spliced {
                dirs.extend(DEFAULT_INFO_DIRS.iter().map(PathBuf::from));
                spliced = true;
            }
        }
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Find the main file for `topic`.
    ///
    /// A topic that names an existing file is used as is. Otherwise each
    /// directory is tried for `topic`, `topic.info` and their `.gz` forms.
    pub fn locate(&self, topic: &str) -> Option<PathBuf> {
        let direct = Path::new(topic);
        if direct.components().count() > 1 && direct.is_file() {
            return Some(direct.to_path_buf());
        }

        self.dirs.iter().find_map(|dir| {
            candidates(topic)
                .map(|name| dir.join(name))
                .find(|path| path.is_file())
        })
    }
}

fn candidates(topic: &str) -> impl Iterator<Item = String> + '_ {
    ["", ".info", ".gz", ".info.gz"]
        .into_iter()
        .map(move |suffix| format!("{topic}{suffix}"))
}

/// Resolve an indirect sub-file named in a main file's table.
pub(crate) fn locate_sibling(main: &Path, name: &str) -> Option<PathBuf> {
    let dir = main.parent().unwrap_or_else(|| Path::new("."));
    [name.to_string(), format!("{name}.gz")]
        .into_iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}
