//! Command tree and resolver.
//!
//! A [`Command`] is one node of the tree: an optional handler plus an ordered
//! list of named children. [`Command::resolve`] walks the tree along the
//! argument vector and calls the handler of the node where routing stops.
//!
//! # Routing rule
//!
//! At each node, with `arg0` the first remaining argument (empty if none):
//!
//! - `arg0` empty, starting with `-`, or the node has no children: the node
//!   itself handles the invocation.
//! - otherwise `arg0` must be one of the children's names. The full command
//!   name grows by the child's *primary* name, whatever alias was typed.

use tracing::{debug, trace};

use super::alias::AliasSet;
use crate::error::{Error, Result};

/// Prefix that marks an argument as a flag.
pub const FLAG_PREFIX: char = '-';

/// Function run when routing stops on a node.
///
/// Receives the full command name (e.g. `"app get"`) and the arguments left
/// after routing, and returns whatever the invocation produced.
pub type Handler<T> = Box<dyn Fn(&str, &[String]) -> Result<T> + Send + Sync>;

/// A node of the command tree.
pub struct Command<T = ()> {
    handler: Option<Handler<T>>,
    children: Vec<SubCommand<T>>,
}

/// A child registration: its raw alias key, the parsed names, and the node.
pub struct SubCommand<T> {
    key: String,
    names: Option<AliasSet>,
    command: Command<T>,
}

impl<T> SubCommand<T> {
    /// The alias key exactly as registered.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Parsed names; `None` when the key holds no usable name.
    #[must_use]
    pub const fn names(&self) -> Option<&AliasSet> {
        self.names.as_ref()
    }

    #[must_use]
    pub const fn command(&self) -> &Command<T> {
        &self.command
    }
}

impl<T> Default for Command<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Command<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("handler", &self.handler.is_some())
            .field(
                "children",
                &self.children.iter().map(|c| c.key.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<T> Command<T> {
    /// A routing-only node with no handler and no children.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handler: None,
            children: Vec::new(),
        }
    }

    /// Set the handler of this node.
    #[must_use]
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str, &[String]) -> Result<T> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Add a child addressed by the comma-delimited `names`.
    ///
    /// A key without any usable name is kept as given and reported as
    /// [`Error::InvalidCommandName`] when routing reaches this node, or by
    /// [`Command::validate`].
    #[must_use]
    pub fn subcommand(mut self, names: &str, command: Self) -> Self {
        self.children.push(SubCommand {
            key: names.to_string(),
            names: AliasSet::parse(names),
            command,
        });
        self
    }

    #[must_use]
    pub const fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Children in registration order.
    pub fn subcommands(&self) -> impl Iterator<Item = &SubCommand<T>> {
        self.children.iter()
    }

    /// Child answering to `name`, if any.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&SubCommand<T>> {
        self.children
            .iter()
            .find(|child| child.names.as_ref().is_some_and(|n| n.contains(name)))
    }

    /// Route `args` through the tree and run the handler where routing stops.
    ///
    /// `full_name` is the name of this node as seen by the user, normally the
    /// program name for the root.
    ///
    /// # Errors
    ///
    /// - [`Error::NoExecFunc`] when routing stops on a node without handler.
    /// - [`Error::InvalidCommandName`] when a child of a node routed through
    ///   has no usable name.
    /// - [`Error::CommandNotFound`] when no child answers to the argument.
    /// - Any error returned by the handler, unchanged.
    pub fn resolve(&self, full_name: &str, args: &[String]) -> Result<T> {
        let arg0 = args.first().map_or("", String::as_str);

        if arg0.is_empty() || arg0.starts_with(FLAG_PREFIX) || self.children.is_empty() {
            let Some(handler) = &self.handler else {
                debug!(command = full_name, "routing ended on a node without handler");
                return Err(Error::NoExecFunc {
                    command: full_name.to_string(),
                });
            };
            debug!(command = full_name, args = args.len(), "dispatching");
            return handler(full_name, args);
        }

        // Every sibling is checked before matching so a broken key is reported
        // no matter where it sits in the list.
        if let Some(invalid) = self.children.iter().find(|child| child.names.is_none()) {
            return Err(Error::InvalidCommandName {
                command: full_name.to_string(),
                name: invalid.key.clone(),
            });
        }

        for child in &self.children {
            let Some(names) = &child.names else { continue };
            if names.contains(arg0) {
                let child_name = format!("{full_name} {}", names.primary());
                trace!(from = full_name, to = %child_name, alias = arg0, "routing");
                return child.command.resolve(&child_name, &args[1..]);
            }
        }

        debug!(command = full_name, name = arg0, "no sub-command matched");
        Err(Error::CommandNotFound {
            command: full_name.to_string(),
            name: arg0.to_string(),
        })
    }

    /// Check the whole tree for keys without names and for names shared by
    /// siblings.
    ///
    /// # Errors
    ///
    /// The first [`Error::InvalidCommandName`] or
    /// [`Error::DuplicateCommandName`] found, depth first.
    pub fn validate(&self, full_name: &str) -> Result<()> {
        let mut seen: Vec<&str> = Vec::new();
        for child in &self.children {
            let Some(names) = &child.names else {
                return Err(Error::InvalidCommandName {
                    command: full_name.to_string(),
                    name: child.key.clone(),
                });
            };
            for name in names.iter() {
                if seen.contains(&name) {
                    return Err(Error::DuplicateCommandName {
                        command: full_name.to_string(),
                        name: name.to_string(),
                    });
                }
                seen.push(name);
            }
        }

        for child in &self.children {
            if let Some(names) = &child.names {
                child
                    .command
                    .validate(&format!("{full_name} {}", names.primary()))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alias::split_trim;
    use crate::error::ErrorKind;
    use tracing_test::traced_test;

    /// Handler that reports which node ran, with the name and args it got.
    fn tag(label: &'static str) -> impl Fn(&str, &[String]) -> Result<String> + Send + Sync {
        move |name, args| Ok(format!("{label}|{name}|{}", args.join(" ")))
    }

    fn app() -> Command<String> {
        Command::new()
            .handler(tag("app"))
            .subcommand("cmd0,c0", Command::new())
            .subcommand("cmd1,alias11,alias12", Command::new().handler(tag("cmd1")))
            .subcommand(
                "cmd2,alias21,alias22",
                Command::new()
                    .handler(tag("cmd2"))
                    .subcommand("sub21", Command::new().handler(tag("sub21"))),
            )
    }

    fn resolve(cmd: &Command<String>, args: &str) -> Result<String> {
        cmd.resolve("app", &split_trim(args, " "))
    }

    #[test]
    fn empty_args_run_root() {
        assert_eq!(resolve(&app(), "").unwrap(), "app|app|");
    }

    #[test]
    fn primary_and_aliases_route_to_same_child() {
        assert_eq!(resolve(&app(), "cmd1").unwrap(), "cmd1|app cmd1|");
        assert_eq!(resolve(&app(), "alias11").unwrap(), "cmd1|app cmd1|");
        assert_eq!(resolve(&app(), "alias12 -v x").unwrap(), "cmd1|app cmd1|-v x");
        assert_eq!(resolve(&app(), "alias22").unwrap(), "cmd2|app cmd2|");
    }

    #[test]
    fn nested_route_uses_primary_names() {
        assert_eq!(resolve(&app(), "alias21 sub21").unwrap(), "sub21|app cmd2 sub21|");
    }

    #[test]
    fn leaf_keeps_non_flag_arguments() {
        assert_eq!(resolve(&app(), "cmd1 file1 file2").unwrap(), "cmd1|app cmd1|file1 file2");
    }

    #[test]
    fn flag_first_stays_on_current_node() {
        assert_eq!(resolve(&app(), "-x cmd1").unwrap(), "app|app|-x cmd1");
        assert_eq!(resolve(&app(), "cmd2 --flag sub21").unwrap(), "cmd2|app cmd2|--flag sub21");
    }

    #[test]
    fn unknown_sub_command() {
        let err = resolve(&app(), "cmd-unknown").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CommandNotFound);
        assert_eq!(err.to_string(), r#"app: command not found "cmd-unknown""#);
    }

    #[test]
    fn unknown_nested_sub_command_names_parent() {
        let err = resolve(&app(), "c0x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CommandNotFound);

        let err = resolve(&app(), "alias21 nope").unwrap_err();
        assert_eq!(err.to_string(), r#"app cmd2: command not found "nope""#);
    }

    #[test]
    fn node_without_handler() {
        let err = resolve(&app(), "c0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoExecFunc);
        assert_eq!(err.to_string(), "app cmd0: exec function undefined");
    }

    #[test]
    fn root_without_handler_and_no_args() {
        let cmd: Command<String> = Command::new().subcommand("a", Command::new().handler(tag("a")));
        let err = resolve(&cmd, "").unwrap_err();
        assert_eq!(err.to_string(), "app: exec function undefined");
    }

    #[test]
    fn invalid_command_name() {
        let cmd: Command<String> = Command::new().subcommand("  ,  ,  ", Command::new());
        let err = resolve(&cmd, "xxxx").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCommandName);
        assert_eq!(err.to_string(), r#"app: invalid command name "  ,  ,  ""#);
    }

    #[test]
    fn invalid_sibling_reported_even_when_a_valid_child_matches() {
        let cmd: Command<String> = Command::new()
            .subcommand("get", Command::new().handler(tag("get")))
            .subcommand(" , ", Command::new());
        let err = resolve(&cmd, "get").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCommandName);
    }

    #[test]
    fn invalid_sibling_not_checked_when_node_handles_itself() {
        let cmd: Command<String> = Command::new()
            .handler(tag("root"))
            .subcommand(" , ", Command::new());
        assert_eq!(resolve(&cmd, "-v").unwrap(), "root|app|-v");
    }

    #[test]
    fn first_registered_child_wins_on_shared_alias() {
        let cmd: Command<String> = Command::new()
            .subcommand("one,x", Command::new().handler(tag("one")))
            .subcommand("two,x", Command::new().handler(tag("two")));
        assert_eq!(resolve(&cmd, "x").unwrap(), "one|app one|");
    }

    #[test]
    fn handler_errors_pass_through_unchanged() {
        let cmd: Command<()> = Command::new().subcommand(
            "get",
            Command::new().handler(|name, _| {
                Err(Error::UnknownFlag {
                    command: name.to_string(),
                    flag: "-x".to_string(),
                })
            }),
        );
        let err = cmd.resolve("app", &["get".to_string(), "-x".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "app get: flag provided but not defined: -x");
    }

    #[test]
    fn validate_accepts_well_formed_tree() {
        assert!(app().validate("app").is_ok());
    }

    #[test]
    fn validate_reports_nested_invalid_key() {
        let cmd: Command<String> = Command::new().subcommand(
            "get,g",
            Command::new().subcommand(",", Command::new()),
        );
        let err = cmd.validate("app").unwrap_err();
        assert_eq!(err.to_string(), r#"app get: invalid command name ",""#);
    }

    #[test]
    fn validate_reports_duplicate_alias() {
        let cmd: Command<String> = Command::new()
            .subcommand("get,g", Command::new())
            .subcommand("go,g", Command::new());
        let err = cmd.validate("app").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateCommandName);
        assert_eq!(err.to_string(), r#"app: duplicate command name "g""#);
    }

    #[test]
    fn find_and_introspection() {
        let cmd = app();
        let child = cmd.find("alias21").unwrap();
        assert_eq!(child.key(), "cmd2,alias21,alias22");
        assert_eq!(child.names().unwrap().primary(), "cmd2");
        assert!(child.command().has_handler());
        assert!(cmd.find("missing").is_none());
        assert_eq!(cmd.subcommands().count(), 3);
    }

    #[test]
    fn concurrent_resolution_of_one_tree() {
        let cmd = app();
        std::thread::scope(|scope| {
            let handles: Vec<_> = ["cmd1", "alias22", "alias21 sub21", ""]
                .into_iter()
                .map(|args| {
                    let cmd = &cmd;
                    scope.spawn(move || resolve(cmd, args).unwrap())
                })
                .collect();
            let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert_eq!(
                results,
                vec!["cmd1|app cmd1|", "cmd2|app cmd2|", "sub21|app cmd2 sub21|", "app|app|"]
            );
        });
    }

    #[test]
    #[traced_test]
    fn routing_is_logged() {
        resolve(&app(), "alias21 sub21").unwrap();
        assert!(logs_contain("routing"));
        assert!(logs_contain("dispatching"));
    }

    #[test]
    #[traced_test]
    fn missing_handler_is_logged() {
        let _ = resolve(&app(), "cmd0");
        assert!(logs_contain("without handler"));
    }
}
