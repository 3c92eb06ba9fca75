//! Command dispatch.

use yos_vfs::{join_path, list, portfolio_tree, read, resolve, Node, VfsError};

use crate::clock::format_date;
use crate::content::content_block;
use crate::session::{Session, HOME};

/// What the host shell should do after a line executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    /// `clear` emptied the transcript.
    Cleared,
    /// `exit` leaves terminal mode.
    Exit,
}

pub fn execute(session: &mut Session, raw: &str) -> Action {
    let trimmed = raw.trim();
    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or("").to_lowercase();
    let args: Vec<&str> = parts.collect();

    if command.is_empty() {
        session.record(raw, vec![String::new()]);
        return Action::Continue;
    }

    match command.as_str() {
        "clear" => {
            session.transcript.clear();
            session.history.clear();
            return Action::Cleared;
        }
        "exit" => return Action::Exit,
        _ => {}
    }

    let output = if let Some(block) = content_block(&command) {
        block.iter().map(|line| line.to_string()).collect()
    } else if let Some(output) = builtin(session, &command, &args) {
        output
    } else {
        vec![
            format!("bash: {command}: command not found"),
            "Type \"help\" for available commands.".to_string(),
            String::new(),
        ]
    };

    session.record(raw, output);
    Action::Continue
}

fn builtin(session: &mut Session, command: &str, args: &[&str]) -> Option<Vec<String>> {
    match command {
        "ls" => Some(ls(session, args)),
        "pwd" => Some(vec![session.current_path.clone()]),
        "cd" => Some(cd(session, args)),
        "cat" => Some(cat(session, args)),
        "tree" => Some(tree(session)),
        "whoami" => Some(vec!["yohannes".to_string()]),
        "uname" => Some(uname(args)),
        "date" => Some(vec![format_date(session.clock.now())]),
        "echo" => Some(vec![args.join(" ")]),
        _ => None,
    }
}

fn ls(session: &Session, args: &[&str]) -> Vec<String> {
    let display = args
        .first()
        .map(|arg| arg.to_string())
        .unwrap_or_else(|| session.current_path.clone());
    let input = args.first().copied().unwrap_or(".");

    let node = match resolve(portfolio_tree(), &session.current_path, input) {
        Ok(node) => node,
        Err(_) => {
            return vec![format!(
                "ls: cannot access '{display}': No such file or directory"
            )];
        }
    };

    match list(node, &display) {
        Ok(entries) => {
            if entries.is_empty() {
                return vec![String::new()];
            }
            entries
                .into_iter()
                .map(|entry| {
                    if entry.is_dir {
                        format!("{}/", entry.name)
                    } else {
                        entry.name
                    }
                })
                .collect()
        }
        // A path naming a file lists the path as typed.
        Err(_) => vec![display],
    }
}

fn cd(session: &mut Session, args: &[&str]) -> Vec<String> {
    let Some(&input) = args.first() else {
        session.current_path = HOME.to_string();
        return vec![String::new()];
    };

    match resolve(portfolio_tree(), &session.current_path, input) {
        Ok(node) if node.is_dir() => {
            session.current_path = join_path(&session.current_path, input);
            vec![String::new()]
        }
        Ok(_) => vec![format!("cd: not a directory: {input}")],
        Err(VfsError::NotADirectory { .. }) => vec![format!("cd: not a directory: {input}")],
        Err(_) => vec![format!("cd: no such file or directory: {input}")],
    }
}

fn cat(session: &Session, args: &[&str]) -> Vec<String> {
    let Some(&input) = args.first() else {
        return vec!["cat: missing file operand".to_string()];
    };

    let node = match resolve(portfolio_tree(), &session.current_path, input) {
        Ok(node) => node,
        Err(_) => return vec![format!("cat: {input}: No such file or directory")],
    };

    match read(node, input) {
        Ok(content) if content.is_empty() => vec!["Empty file".to_string()],
        Ok(content) => vec![content.to_string()],
        Err(_) => vec![format!("cat: {input}: Is a directory")],
    }
}

fn tree(session: &Session) -> Vec<String> {
    let Ok(node) = resolve(portfolio_tree(), &session.current_path, ".") else {
        return vec!["tree: cannot access current directory".to_string()];
    };

    let mut lines = vec![session.current_path.clone()];
    tree_branch(node, "", &mut lines);
    lines
}

fn tree_branch(node: &Node, prefix: &str, lines: &mut Vec<String>) {
    let Node::Directory { children } = node else {
        return;
    };
    let last = children.len().saturating_sub(1);
    for (index, (name, child)) in children.iter().enumerate() {
        let is_last = index == last;
        let connector = if is_last { "└── " } else { "├── " };
        let display = if child.is_dir() {
            format!("{name}/")
        } else {
            name.clone()
        };
        lines.push(format!("{prefix}{connector}{display}"));
        if child.is_dir() {
            let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
            tree_branch(child, &child_prefix, lines);
        }
    }
}

fn uname(args: &[&str]) -> Vec<String> {
    if args.first() == Some(&"-a") {
        vec!["YohannesOS 2.1.0 yohannes-portfolio x86_64 GNU/Linux".to_string()]
    } else {
        vec!["YohannesOS".to_string()]
    }
}
