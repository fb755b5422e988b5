//! Interactive terminal screens: login, admin dashboard, user dashboard.

use std::io::{self, BufRead};

use console::{style, Term};

use stockroom_core::auth::CredentialLookup;
use stockroom_core::error::{AddOutcome, AuthError, SessionError};
use stockroom_core::output::format_listing;
use stockroom_core::session::{Screen, Session};

/// Line-oriented input/output used by the screens.
///
/// `None` from a read means the input is exhausted.
pub trait Prompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
    fn read_secret(&mut self, prompt: &str) -> io::Result<Option<String>>;
    fn say(&mut self, text: &str) -> io::Result<()>;
}

/// Prompt over the controlling terminal. Falls back to plain stdin lines when
/// stdin is not a tty, so scripted input works.
pub struct TermPrompt {
    term: Term,
}

impl Default for TermPrompt {
    fn default() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl TermPrompt {
    fn stdin_line(&self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl Prompt for TermPrompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.term.write_str(prompt)?;
        self.term.flush()?;
        self.stdin_line()
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.term.write_str(prompt)?;
        self.term.flush()?;
        if self.term.is_term() {
            self.term.read_secure_line().map(Some)
        } else {
            self.stdin_line()
        }
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        self.term.write_line(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

const ADMIN_HELP: &str = "Commands: add, remove [name], list, logout, quit";
const USER_HELP: &str = "Commands: search [query], list, logout, quit";

/// Drive the screens until the user quits or input runs out.
pub fn run_shell<C, P>(session: &mut Session<C>, prompt: &mut P) -> io::Result<()>
where
    C: CredentialLookup,
    P: Prompt,
{
    let mut shown = None;
    loop {
        let screen = session.screen();
        if shown != Some(screen) {
            enter_screen(session, prompt)?;
            shown = Some(screen);
        }
        let flow = match screen {
            Screen::Login => login_screen(session, prompt)?,
            Screen::Admin => admin_command(session, prompt)?,
            Screen::User => user_command(session, prompt)?,
        };
        if flow == Flow::Quit {
            return Ok(());
        }
    }
}

fn enter_screen<C: CredentialLookup, P: Prompt>(
    session: &Session<C>,
    prompt: &mut P,
) -> io::Result<()> {
    let screen = session.screen();
    prompt.say("")?;
    prompt.say(&style(screen.title()).bold().to_string())?;
    match screen {
        Screen::Login => Ok(()),
        Screen::Admin => {
            show_listing(prompt, session.products().iter())?;
            prompt.say(ADMIN_HELP)
        }
        Screen::User => {
            show_listing(prompt, session.products().iter())?;
            prompt.say(USER_HELP)
        }
    }
}

fn login_screen<C: CredentialLookup, P: Prompt>(
    session: &mut Session<C>,
    prompt: &mut P,
) -> io::Result<Flow> {
    let Some(username) = prompt.read_line("Username: ")? else {
        return Ok(Flow::Quit);
    };
    let username = username.trim().to_string();
    if username == "quit" {
        return Ok(Flow::Quit);
    }
    let Some(password) = prompt.read_secret("Password: ")? else {
        return Ok(Flow::Quit);
    };

    match session.login(&username, &password) {
        Ok(_) => {}
        Err(SessionError::Auth(AuthError::InvalidCredentials)) => {
            prompt.say(&style("Invalid credentials").red().to_string())?;
        }
        Err(e) => report(prompt, &e)?,
    }
    Ok(Flow::Continue)
}

fn admin_command<C: CredentialLookup, P: Prompt>(
    session: &mut Session<C>,
    prompt: &mut P,
) -> io::Result<Flow> {
    let Some(line) = prompt.read_line("admin> ")? else {
        return Ok(Flow::Quit);
    };
    let (command, rest) = split_command(&line);
    match command {
        "" => {}
        "add" => add_form(session, prompt)?,
        "remove" => {
            let name = match rest {
                Some(name) => name.to_string(),
                None => match prompt.read_line("Enter product name to remove: ")? {
                    Some(name) => name.trim().to_string(),
                    None => return Ok(Flow::Quit),
                },
            };
            match session.remove(&name) {
                Ok(outcome) if outcome.is_noop() => {
                    prompt.say(&format!("No product named '{name}'"))?;
                }
                Ok(outcome) => {
                    prompt.say(&format!("Removed {} product(s) named '{name}'", outcome.removed))?;
                    show_listing(prompt, session.products().iter())?;
                }
                Err(e) => report(prompt, &e)?,
            }
        }
        "list" => show_listing(prompt, session.products().iter())?,
        "logout" => session.logout(),
        "quit" | "exit" => return Ok(Flow::Quit),
        _ => prompt.say(ADMIN_HELP)?,
    }
    Ok(Flow::Continue)
}

fn add_form<C: CredentialLookup, P: Prompt>(
    session: &mut Session<C>,
    prompt: &mut P,
) -> io::Result<()> {
    let mut fields = Vec::with_capacity(4);
    for label in ["Product Name: ", "Category: ", "Stock: ", "Price: "] {
        match prompt.read_line(label)? {
            Some(value) => fields.push(value.trim().to_string()),
            None => return Ok(()),
        }
    }

    match session.add(&fields[0], &fields[1], &fields[2], &fields[3]) {
        Ok(AddOutcome::Added) => {
            prompt.say(&style("Product added").green().to_string())?;
            show_listing(prompt, session.products().iter())
        }
        Ok(rejected) => prompt.say(&style(rejected).yellow().to_string()),
        Err(e) => report(prompt, &e),
    }
}

fn user_command<C: CredentialLookup, P: Prompt>(
    session: &mut Session<C>,
    prompt: &mut P,
) -> io::Result<Flow> {
    let Some(line) = prompt.read_line("search> ")? else {
        return Ok(Flow::Quit);
    };
    let (command, rest) = split_command(&line);
    match command {
        "" => {}
        "search" => {
            let query = match rest {
                Some(query) => query.to_string(),
                None => match prompt.read_line("Search product: ")? {
                    Some(query) => query.trim().to_string(),
                    None => return Ok(Flow::Quit),
                },
            };
            match session.search(&query) {
                Ok(hits) if hits.is_empty() => prompt.say("No matching products")?,
                Ok(hits) => show_listing(prompt, hits)?,
                Err(e) => report(prompt, &e)?,
            }
        }
        "list" => show_listing(prompt, session.products().iter())?,
        "logout" => session.logout(),
        "quit" | "exit" => return Ok(Flow::Quit),
        _ => prompt.say(USER_HELP)?,
    }
    Ok(Flow::Continue)
}

fn split_command(line: &str) -> (&str, Option<&str>) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, Some(rest.trim()).filter(|r| !r.is_empty())),
        None => (line, None),
    }
}

fn show_listing<'a, P, I>(prompt: &mut P, products: I) -> io::Result<()>
where
    P: Prompt,
    I: IntoIterator<Item = &'a stockroom_core::config::Product>,
{
    let listing = format_listing(products);
    if listing.is_empty() {
        return prompt.say("(no products)");
    }
    for line in listing.lines() {
        prompt.say(line)?;
    }
    Ok(())
}

fn report<P: Prompt>(prompt: &mut P, err: &SessionError) -> io::Result<()> {
    log::error!("{err}");
    prompt.say(&style(format!("Error: {err}")).red().to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use stockroom_core::auth::StaticCredentials;
    use stockroom_core::store::ProductStore;

    /// Canned input and captured output.
    #[derive(Default)]
    struct ScriptedPrompt {
        input: VecDeque<String>,
        output: Vec<String>,
    }

    impl ScriptedPrompt {
        fn new<I, S>(lines: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                input: lines.into_iter().map(Into::into).collect(),
                output: Vec::new(),
            }
        }

        fn transcript(&self) -> String {
            self.output.join("\n")
        }
    }

    impl Prompt for ScriptedPrompt {
        fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
            Ok(self.input.pop_front())
        }

        fn read_secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
            self.read_line(prompt)
        }

        fn say(&mut self, text: &str) -> io::Result<()> {
            self.output.push(text.to_string());
            Ok(())
        }
    }

    fn session() -> (tempfile::TempDir, Session<StaticCredentials>) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProductStore::new(dir.path().join("products.json"));
        (dir, Session::new(StaticCredentials::builtin(), store))
    }

    #[test]
    fn split_command_variants() {
        assert_eq!(split_command("list"), ("list", None));
        assert_eq!(split_command("  remove Red Pen "), ("remove", Some("Red Pen")));
        assert_eq!(split_command("search   "), ("search", None));
        assert_eq!(split_command(""), ("", None));
    }

    #[test]
    fn bad_login_then_quit() {
        let (_dir, mut s) = session();
        let mut prompt = ScriptedPrompt::new(["admin", "nope", "quit"]);
        run_shell(&mut s, &mut prompt).unwrap();
        assert!(prompt.transcript().contains("Invalid credentials"));
        assert_eq!(s.screen(), Screen::Login);
    }

    #[test]
    fn admin_adds_and_removes() {
        let (_dir, mut s) = session();
        let mut prompt = ScriptedPrompt::new([
            "admin", "admin123",
            "add", "Notebook", "Stationery", "20", "45.5",
            "remove NOTEBOOK",
            "quit",
        ]);
        run_shell(&mut s, &mut prompt).unwrap();
        let out = prompt.transcript();
        assert!(out.contains("Admin Dashboard"));
        assert!(out.contains("Notebook | ₹45.5 | Stock: 20 | Stationery"));
        assert!(out.contains("Removed 1 product(s) named 'NOTEBOOK'"));
        assert!(s.products().is_empty());
    }

    #[test]
    fn admin_add_rejects_bad_stock() {
        let (_dir, mut s) = session();
        let mut prompt = ScriptedPrompt::new([
            "admin", "admin123",
            "add", "Pen", "Stationery", "ten", "5",
        ]);
        run_shell(&mut s, &mut prompt).unwrap();
        assert!(prompt.transcript().contains("Stock must be a whole number"));
        assert!(s.products().is_empty());
    }

    #[test]
    fn user_searches_then_logs_out() {
        let (_dir, mut s) = session();
        {
            let mut store = ProductStore::new(s.store().path());
            store.add("Red Pen", "Stationery", "10", "5.0").unwrap();
            store.add("Rice", "Grocery", "3", "60").unwrap();
        }
        let mut prompt = ScriptedPrompt::new([
            "rahul", "user123",
            "search pen",
            "search xyz",
            "add",
            "logout",
        ]);
        run_shell(&mut s, &mut prompt).unwrap();
        let out = prompt.transcript();
        assert!(out.contains("User Dashboard"));
        assert!(out.contains("Red Pen | ₹5.0 | Stock: 10 | Stationery"));
        assert!(out.contains("No matching products"));
        assert!(out.contains(USER_HELP));
        assert_eq!(s.screen(), Screen::Login);
        assert_eq!(s.products().len(), 2);
    }

    #[test]
    fn exhausted_input_ends_shell() {
        let (_dir, mut s) = session();
        let mut prompt = ScriptedPrompt::new(Vec::<String>::new());
        run_shell(&mut s, &mut prompt).unwrap();
        assert!(prompt.transcript().contains("Inventory Login"));
    }
}
