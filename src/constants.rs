//! Global Constants
//!
//! Centralized constants for configuration and tuning.

/// Generation retry constants
pub mod retry {
    /// Total attempts per unit (one initial call plus one bounded retry)
    pub const MAX_ATTEMPTS: u8 = 2;

    /// Upper bound on the delay before the retry (milliseconds)
    pub const MAX_DELAY_MS: u64 = 10_000;
}

/// HTTP/Network constants
pub mod network {
    /// Default request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Connection timeout (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 30;
}

/// Docstring rendering constants
pub mod docstring {
    /// Quote style used for every rendered docstring
    pub const QUOTES: &str = "\"\"\"";

    /// Maximum characters of unit source passed to the generator
    pub const MAX_CONTEXT_CHARS: usize = 6_000;

    /// Default documentation language for generated docstrings
    pub const DEFAULT_LANGUAGE: &str = "en";
}

/// Project scanning constants
pub mod scan {
    /// Maximum file size to parse (1MB)
    pub const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Directories never descended into
    pub const SKIP_DIRS: &[&str] = &[
        "__pycache__",
        "tests",
        "test",
        "docs",
        "node_modules",
        "target",
        "build",
        "dist",
        "venv",
        "env",
        "site-packages",
    ];

    /// Entry-point and tooling files that are not part of the documented API
    pub const SKIP_FILES: &[&str] = &["setup.py", "conftest.py", "wsgi.py", "asgi.py"];
}

/// Python ecosystem knowledge
pub mod python {
    /// Top-level standard library modules (CPython 3.12 `sys.stdlib_module_names`)
    pub const STDLIB_MODULES: &[&str] = &[
        "__future__", "_thread", "abc", "aifc", "argparse", "array", "ast", "asynchat",
        "asyncio", "asyncore", "atexit", "audioop", "base64", "bdb", "binascii", "bisect",
        "builtins", "bz2", "calendar", "cgi", "cgitb", "chunk", "cmath", "cmd", "code",
        "codecs", "codeop", "collections", "colorsys", "compileall", "concurrent",
        "configparser", "contextlib", "contextvars", "copy", "copyreg", "cProfile", "crypt",
        "csv", "ctypes", "curses", "dataclasses", "datetime", "dbm", "decimal", "difflib",
        "dis", "doctest", "email", "encodings", "ensurepip", "enum", "errno", "faulthandler",
        "fcntl", "filecmp", "fileinput", "fnmatch", "fractions", "ftplib", "functools", "gc",
        "getopt", "getpass", "gettext", "glob", "graphlib", "grp", "gzip", "hashlib", "heapq",
        "hmac", "html", "http", "imaplib", "imghdr", "imp", "importlib", "inspect", "io",
        "ipaddress", "itertools", "json", "keyword", "lib2to3", "linecache", "locale",
        "logging", "lzma", "mailbox", "mailcap", "marshal", "math", "mimetypes", "mmap",
        "modulefinder", "msvcrt", "multiprocessing", "netrc", "nis", "nntplib", "numbers",
        "operator", "optparse", "os", "ossaudiodev", "pathlib", "pdb", "pickle",
        "pickletools", "pipes", "pkgutil", "platform", "plistlib", "poplib", "posix",
        "posixpath", "pprint", "profile", "pstats", "pty", "pwd", "py_compile", "pyclbr",
        "pydoc", "queue", "quopri", "random", "re", "readline", "reprlib", "resource",
        "rlcompleter", "runpy", "sched", "secrets", "select", "selectors", "shelve", "shlex",
        "shutil", "signal", "site", "smtplib", "sndhdr", "socket", "socketserver", "spwd",
        "sqlite3", "ssl", "stat", "statistics", "string", "stringprep", "struct",
        "subprocess", "sunau", "symtable", "sys", "sysconfig", "syslog", "tabnanny",
        "tarfile", "telnetlib", "tempfile", "termios", "textwrap", "threading", "time",
        "timeit", "tkinter", "token", "tokenize", "tomllib", "trace", "traceback",
        "tracemalloc", "tty", "turtle", "types", "typing", "unicodedata", "unittest",
        "urllib", "uu", "uuid", "venv", "warnings", "wave", "weakref", "webbrowser",
        "winreg", "winsound", "wsgiref", "xdrlib", "xml", "xmlrpc", "zipapp", "zipfile",
        "zipimport", "zlib", "zoneinfo",
    ];

    /// Import names whose distribution name differs
    pub const DISTRIBUTION_NAMES: &[(&str, &str)] = &[
        ("yaml", "PyYAML"),
        ("cv2", "opencv-python"),
        ("PIL", "Pillow"),
        ("sklearn", "scikit-learn"),
        ("bs4", "beautifulsoup4"),
        ("dateutil", "python-dateutil"),
        ("dotenv", "python-dotenv"),
        ("jwt", "PyJWT"),
        ("serial", "pyserial"),
        ("skimage", "scikit-image"),
        ("attr", "attrs"),
        ("google.protobuf", "protobuf"),
    ];

    pub fn is_stdlib(module: &str) -> bool {
        STDLIB_MODULES.contains(&module)
    }

    /// Map an import path to its pip distribution name
    pub fn distribution_name(import: &str) -> String {
        DISTRIBUTION_NAMES
            .iter()
            .find(|(name, _)| import == *name || import.starts_with(&format!("{}.", name)))
            .map(|(_, dist)| dist.to_string())
            .unwrap_or_else(|| import.split('.').next().unwrap_or(import).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::python;

    #[test]
    fn test_stdlib_lookup() {
        assert!(python::is_stdlib("os"));
        assert!(python::is_stdlib("asyncio"));
        assert!(!python::is_stdlib("requests"));
    }

    #[test]
    fn test_distribution_name_mapping() {
        assert_eq!(python::distribution_name("yaml"), "PyYAML");
        assert_eq!(python::distribution_name("PIL.Image"), "Pillow");
        assert_eq!(python::distribution_name("requests.adapters"), "requests");
        assert_eq!(python::distribution_name("google.protobuf.message"), "protobuf");
    }
}
