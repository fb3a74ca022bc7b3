//! Interactive session
//!
//! Reads commands line by line, runs them against the model and saves the
//! snapshot after every change. Errors are reported and the session goes on.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use super::line::{parse_line, Action, ExpenseFilter};
use crate::audit::AuditLogger;
use crate::commands::{self, Command};
use crate::config::{PennywisePaths, Settings};
use crate::display::{
    format_budget_list, format_budget_status, format_event_list, format_expense_list,
    format_history, format_menu,
};
use crate::error::PennywiseResult;
use crate::model::Model;
use crate::models::{Budget, Expense, MenuCatalog};
use crate::storage::SnapshotRepository;
use crate::timekeeper::Timekeeper;

/// What the session loop should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Exit,
}

pub struct Session {
    model: Model,
    repository: SnapshotRepository,
    settings: Settings,
    audit: Option<AuditLogger>,
}

impl Session {
    /// Open the session stored under `paths`, on the system clock
    pub fn open(paths: &PennywisePaths) -> PennywiseResult<Self> {
        paths.ensure_directories()?;
        let settings = Settings::load_or_create(paths)?;
        Self::open_with(paths, settings, Timekeeper::system())
    }

    pub fn open_with(
        paths: &PennywisePaths,
        settings: Settings,
        timekeeper: Timekeeper,
    ) -> PennywiseResult<Self> {
        settings.validate()?;
        let repository = SnapshotRepository::new(paths.snapshot_file());
        let snapshot = repository.load()?;
        let mut model = Model::from_snapshot(snapshot, settings.history_capacity, timekeeper)?;

        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));
        if let Some(logger) = &audit {
            model = model.with_audit(logger.clone());
        }

        info!(path = %repository.path().display(), "Session opened");
        Ok(Self {
            model,
            repository,
            settings,
            audit,
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Convert due events and list the ones coming up
    pub fn greeting(&mut self) -> PennywiseResult<String> {
        let mut output = self.convert_due_events()?;
        let upcoming = self.model.upcoming_events(self.settings.upcoming_days);
        if !upcoming.is_empty() {
            output.push_str(&format!(
                "Upcoming payments in the next {} day(s):\n",
                self.settings.upcoming_days
            ));
            output.push_str(&format_event_list(&upcoming, &self.settings.date_format));
        }
        Ok(output)
    }

    /// Handle one line of input
    pub fn handle_line(&mut self, line: &str) -> Reply {
        match self.respond(line) {
            Ok(reply) => reply,
            Err(e) => {
                debug!(error = %e, "Command failed");
                // Due events may have been converted before the failure
                if let Err(save_error) = self.save() {
                    warn!(error = %save_error, "Failed to save after error");
                }
                Reply::Output(format!("Error: {}\n", e))
            }
        }
    }

    /// Run until `exit` or end of input
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
        prompt: bool,
    ) -> PennywiseResult<()> {
        match self.greeting() {
            Ok(text) => write!(output, "{}", text)?,
            Err(e) => writeln!(output, "Error: {}", e)?,
        }

        let mut lines = input.lines();
        loop {
            if prompt {
                write!(output, "> ")?;
                output.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            match self.handle_line(&line?) {
                Reply::Output(text) => write!(output, "{}", text)?,
                Reply::Exit => break,
            }
        }
        output.flush()?;
        Ok(())
    }

    fn respond(&mut self, line: &str) -> PennywiseResult<Reply> {
        let Some(action) = parse_line(line)? else {
            return Ok(Reply::Output(String::new()));
        };

        let output = match action {
            Action::Exit => return Ok(Reply::Exit),
            Action::Help(text) => text,
            Action::Execute(command) => self.run_command(command)?,
            view => {
                let mut output = self.convert_due_events()?;
                output.push_str(&self.render(view)?);
                output
            }
        };
        Ok(Reply::Output(output))
    }

    fn run_command(&mut self, command: Command) -> PennywiseResult<String> {
        let result = commands::execute(&mut self.model, command)?;
        if result.mutated {
            self.save()?;
        }
        Ok(format!("{}\n", result.feedback))
    }

    fn render(&self, view: Action) -> PennywiseResult<String> {
        let date_format = self.settings.date_format.as_str();
        let store = self.model.store();
        let output = match view {
            Action::ListExpenses(filter) => {
                let expenses = self.filter_expenses(&filter)?;
                format_expense_list(&expenses, date_format)
            }
            Action::ListBudgets => format_budget_list(&store.filtered_budgets(|_| true)),
            Action::ShowBudget { name: None } => {
                let primary = self.model.primary_budget();
                format_budget_status(&primary, &self.model.primary_budget_status())
            }
            Action::ShowBudget { name: Some(name) } => {
                let budget = self.resolve_budget(&name)?;
                let status = store.budget_status(&budget, self.model.now());
                format_budget_status(&budget, &status)
            }
            Action::ListEvents { upcoming: true } => format_event_list(
                &self.model.upcoming_events(self.settings.upcoming_days),
                date_format,
            ),
            Action::ListEvents { upcoming: false } => {
                format_event_list(&store.filtered_events(|_| true), date_format)
            }
            Action::ShowMenu => format_menu(MenuCatalog::items()),
            Action::ShowHistory { audit } => {
                let mut output = format_history(self.model.history());
                if let Some(count) = audit {
                    output.push_str(&self.recent_audit(count)?);
                }
                output
            }
            Action::Execute(_) | Action::Help(_) | Action::Exit => String::new(),
        };
        Ok(output)
    }

    fn filter_expenses(&self, filter: &ExpenseFilter) -> PennywiseResult<Vec<&Expense>> {
        let store = self.model.store();
        let mut expenses = if filter.current_period {
            self.model.primary_period_expenses()
        } else {
            store.filtered_expenses(|_| true)
        };

        if let Some(name) = &filter.budget {
            let budget = self.resolve_budget(name)?;
            let tag = budget.member_tag();
            expenses.retain(|e| e.belongs_to(tag));
        }
        if let Some(category) = filter.category {
            expenses.retain(|e| e.category == category);
        }
        if let Some(search) = &filter.search {
            let needle = search.to_lowercase();
            expenses.retain(|e| e.description.to_lowercase().contains(&needle));
        }
        Ok(expenses)
    }

    /// A stored budget by name, or the default budget by its reserved name
    fn resolve_budget(&self, name: &str) -> PennywiseResult<Budget> {
        let default = Budget::default_budget();
        if default.has_name(name) {
            return Ok(default);
        }
        self.model.store().find_budget(name).cloned()
    }

    fn recent_audit(&self, count: usize) -> PennywiseResult<String> {
        let Some(logger) = &self.audit else {
            return Ok("Audit log is disabled.\n".to_string());
        };
        let entries = logger.read_recent(count)?;
        if entries.is_empty() {
            return Ok("Audit log is empty.\n".to_string());
        }
        let mut output = String::from("Audit log:\n");
        for entry in entries {
            output.push_str(&entry.format_human_readable());
            output.push('\n');
        }
        Ok(output)
    }

    fn convert_due_events(&mut self) -> PennywiseResult<String> {
        let converted = self.model.process_transpired_events()?;
        if converted.is_empty() {
            return Ok(String::new());
        }
        self.save()?;
        Ok(format!(
            "{} scheduled event(s) became expenses.\n",
            converted.len()
        ))
    }

    fn save(&self) -> PennywiseResult<()> {
        self.repository.save(&self.model.snapshot())
    }
}
