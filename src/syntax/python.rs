//! Python tables
//!
//! Default keyword and builtin word lists for the lexical rules, and the
//! standard-library module table consulted by [`super::StdlibLoader`].

const KEYWORDS: &[&str] = &[
    "def", "class", "if", "else", "while", "return", "for", "try", "except", "as", "in",
];

const BUILTINS: &[&str] = &[
    "print", "len", "range", "input", "int", "float", "str", "list", "dict", "set", "tuple",
    "open", "close", "sum", "min", "max", "sorted", "reversed", "enumerate", "map", "filter",
    "zip", "abs", "round", "pow", "help", "dir", "isinstance", "issubclass", "getattr", "setattr",
];

/// Keyword group used when the config does not override it
pub fn default_keywords() -> Vec<String> {
    KEYWORDS.iter().map(|s| s.to_string()).collect()
}

/// Builtin-call group used when the config does not override it
pub fn default_builtins() -> Vec<String> {
    BUILTINS.iter().map(|s| s.to_string()).collect()
}

/// Public attributes of commonly imported standard-library modules
pub(crate) const STDLIB: &[(&str, &[&str])] = &[
    (
        "os",
        &[
            "path", "name", "sep", "linesep", "environ", "getcwd", "chdir", "listdir", "mkdir",
            "makedirs", "remove", "unlink", "rmdir", "removedirs", "rename", "replace", "stat",
            "walk", "scandir", "getenv", "putenv", "getpid", "system", "popen", "urandom",
            "cpu_count", "fspath", "devnull", "curdir", "pardir", "kill", "access", "chmod",
            "symlink", "readlink", "get_terminal_size", "error",
        ],
    ),
    (
        "os.path",
        &[
            "join", "exists", "isfile", "isdir", "islink", "isabs", "abspath", "basename",
            "dirname", "split", "splitext", "normpath", "realpath", "relpath", "expanduser",
            "expandvars", "getsize", "getmtime", "commonpath", "sep",
        ],
    ),
    (
        "sys",
        &[
            "argv", "path", "modules", "exit", "stdin", "stdout", "stderr", "platform",
            "version", "version_info", "executable", "maxsize", "byteorder", "getsizeof",
            "getrecursionlimit", "setrecursionlimit", "exc_info", "intern", "implementation",
        ],
    ),
    (
        "time",
        &[
            "time", "sleep", "monotonic", "perf_counter", "process_time", "time_ns",
            "localtime", "gmtime", "mktime", "strftime", "strptime", "ctime", "asctime",
            "timezone", "struct_time",
        ],
    ),
    (
        "math",
        &[
            "pi", "e", "tau", "inf", "nan", "sqrt", "pow", "exp", "log", "log2", "log10",
            "sin", "cos", "tan", "asin", "acos", "atan", "atan2", "floor", "ceil", "fabs",
            "factorial", "gcd", "lcm", "isclose", "isfinite", "isinf", "isnan", "hypot",
            "degrees", "radians", "trunc", "comb", "perm", "prod", "fsum",
        ],
    ),
    (
        "re",
        &[
            "compile", "match", "search", "fullmatch", "findall", "finditer", "sub", "subn",
            "split", "escape", "purge", "error", "Pattern", "Match", "IGNORECASE", "MULTILINE",
            "DOTALL", "VERBOSE", "ASCII", "I", "M", "S", "X", "A",
        ],
    ),
    (
        "json",
        &["dump", "dumps", "load", "loads", "JSONDecoder", "JSONEncoder", "JSONDecodeError"],
    ),
    (
        "random",
        &[
            "random", "randint", "randrange", "choice", "choices", "shuffle", "sample",
            "uniform", "seed", "gauss", "getrandbits", "Random",
        ],
    ),
    (
        "string",
        &[
            "ascii_letters", "ascii_lowercase", "ascii_uppercase", "digits", "hexdigits",
            "octdigits", "punctuation", "printable", "whitespace", "capwords", "Template",
            "Formatter",
        ],
    ),
    (
        "subprocess",
        &[
            "run", "Popen", "call", "check_call", "check_output", "PIPE", "STDOUT", "DEVNULL",
            "CalledProcessError", "TimeoutExpired", "CompletedProcess",
        ],
    ),
    (
        "ast",
        &[
            "parse", "walk", "dump", "literal_eval", "iter_child_nodes", "iter_fields",
            "get_docstring", "fix_missing_locations", "unparse", "NodeVisitor",
            "NodeTransformer", "AST", "Assign", "Import", "ImportFrom", "Name",
        ],
    ),
    (
        "importlib",
        &["import_module", "reload", "invalidate_caches", "util", "machinery", "metadata"],
    ),
    (
        "collections",
        &[
            "namedtuple", "deque", "Counter", "OrderedDict", "defaultdict", "ChainMap",
            "UserDict", "UserList", "UserString", "abc",
        ],
    ),
    (
        "itertools",
        &[
            "count", "cycle", "repeat", "accumulate", "chain", "compress", "dropwhile",
            "filterfalse", "groupby", "islice", "pairwise", "starmap", "takewhile", "tee",
            "zip_longest", "product", "permutations", "combinations",
            "combinations_with_replacement",
        ],
    ),
    (
        "functools",
        &[
            "reduce", "partial", "partialmethod", "wraps", "update_wrapper", "lru_cache",
            "cache", "cached_property", "total_ordering", "singledispatch", "cmp_to_key",
        ],
    ),
    (
        "datetime",
        &["date", "time", "datetime", "timedelta", "timezone", "tzinfo", "MINYEAR", "MAXYEAR"],
    ),
    (
        "pathlib",
        &["Path", "PurePath", "PosixPath", "WindowsPath", "PurePosixPath", "PureWindowsPath"],
    ),
    (
        "shutil",
        &[
            "copy", "copy2", "copyfile", "copytree", "rmtree", "move", "which", "disk_usage",
            "make_archive", "unpack_archive", "chown", "get_terminal_size",
        ],
    ),
    (
        "typing",
        &[
            "Any", "Callable", "Dict", "List", "Optional", "Set", "Tuple", "Union", "Iterable",
            "Iterator", "Generic", "TypeVar", "Protocol", "NamedTuple", "TypedDict", "cast",
            "overload", "TYPE_CHECKING",
        ],
    ),
];

/// Look up a stdlib module's attribute list
pub(crate) fn stdlib_attributes(name: &str) -> Option<&'static [&'static str]> {
    STDLIB.iter().find(|(module, _)| *module == name).map(|(_, attrs)| *attrs)
}
