//! Grammar of one session line
//!
//! Lines are split into words with `shell-words`, so descriptions with
//! spaces are quoted: `add "Chicken rice" 3.50 -c food`.

use clap::{Parser, Subcommand};

use super::parse::{
    parse_category, parse_date, parse_money, parse_optional, parse_period, parse_timestamp,
};
use crate::commands::{BudgetEdit, Command, ExpenseEdit};
use crate::error::{PennywiseError, PennywiseResult};
use crate::models::Category;

/// What the session should do with a line
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Execute(Command),
    ListExpenses(ExpenseFilter),
    ListBudgets,
    ShowBudget { name: Option<String> },
    ListEvents { upcoming: bool },
    ShowMenu,
    ShowHistory { audit: Option<usize> },
    /// Text clap produced for `help` or `--help`
    Help(String),
    Exit,
}

/// Filters for the expense listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    pub category: Option<Category>,
    pub budget: Option<String>,
    pub search: Option<String>,
    /// Only the primary budget's expenses in the period being viewed
    pub current_period: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "pennywise",
    no_binary_name = true,
    disable_version_flag = true,
    about = "Track expenses, budgets and scheduled payments"
)]
struct SessionLine {
    #[command(subcommand)]
    command: LineCommand,
}

#[derive(Subcommand, Debug)]
enum LineCommand {
    /// Record an expense
    Add {
        description: String,
        /// Price, e.g. "3.50"
        price: String,
        #[arg(short, long, default_value = "others")]
        category: String,
        /// When it happened (YYYY-MM-DD or "YYYY-MM-DD HH:MM"), defaults to now
        #[arg(short, long)]
        time: Option<String>,
    },

    /// Record a menu item, or show the menu when no item is given
    Menu {
        item: Option<String>,
        #[arg(short, long)]
        time: Option<String>,
    },

    /// Edit an expense
    Edit {
        /// Expense ID (e.g. exp-1a2b3c4d)
        id: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        price: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        time: Option<String>,
    },

    /// Delete an expense
    Delete { id: String },

    /// List expenses
    #[command(alias = "ls")]
    List {
        #[arg(short, long)]
        category: Option<String>,
        /// Budget name
        #[arg(short, long)]
        budget: Option<String>,
        /// Text to look for in descriptions
        #[arg(short, long)]
        search: Option<String>,
        /// Only the primary budget's current period
        #[arg(long)]
        period: bool,
    },

    /// Budget management
    #[command(subcommand)]
    Budget(BudgetLine),

    /// List budgets
    Budgets,

    /// Scheduled payments
    #[command(subcommand)]
    Event(EventLine),

    /// List scheduled events
    Events,

    /// Spending statistics
    Stats {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Undo the last command
    Undo,

    /// Redo the last undone command
    Redo,

    /// Show undo/redo history
    History {
        /// Also show the last N audit log entries
        #[arg(long)]
        audit: Option<usize>,
    },

    /// End the session
    #[command(alias = "quit")]
    Exit,
}

#[derive(Subcommand, Debug)]
enum BudgetLine {
    /// Create a budget and make it primary
    Add {
        name: String,
        /// Spending cap per period
        cap: String,
        /// day, week, month or year
        #[arg(short, long, default_value = "month")]
        period: String,
        /// First day of the first period, defaults to today
        #[arg(short, long)]
        start: Option<String>,
        /// Keep the current primary budget
        #[arg(long)]
        no_switch: bool,
    },

    /// Edit a budget
    Edit {
        name: String,
        /// New name
        #[arg(short = 'n', long = "name")]
        name_to: Option<String>,
        #[arg(short, long)]
        cap: Option<String>,
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Delete a budget (its expenses are kept)
    Delete { name: String },

    /// Make a budget primary
    Switch { name: String },

    /// List budgets
    List,

    /// Show a budget's current period (the primary budget by default)
    Show { name: Option<String> },

    /// View the primary budget's period containing a past date
    Past { date: String },

    /// Return to the current period
    Reset,
}

#[derive(Subcommand, Debug)]
enum EventLine {
    /// Schedule a future payment
    Add {
        description: String,
        price: String,
        /// When it is due (YYYY-MM-DD or "YYYY-MM-DD HH:MM")
        time: String,
        #[arg(short, long, default_value = "others")]
        category: String,
    },

    /// Edit a scheduled event
    Edit {
        /// Event ID (e.g. evt-1a2b3c4d)
        id: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        price: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        time: Option<String>,
    },

    /// Delete a scheduled event
    Delete { id: String },

    /// List scheduled events
    List {
        /// Only events due within the reminder horizon
        #[arg(long)]
        upcoming: bool,
    },
}

/// Parse one line of input
///
/// Returns `Ok(None)` for a blank line.
pub fn parse_line(line: &str) -> PennywiseResult<Option<Action>> {
    let words = shell_words::split(line)
        .map_err(|e| PennywiseError::Validation(format!("Could not split line: {}", e)))?;
    if words.is_empty() {
        return Ok(None);
    }

    match SessionLine::try_parse_from(words) {
        Ok(parsed) => parsed.command.into_action().map(Some),
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp
            | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Ok(Some(Action::Help(e.to_string())))
            }
            _ => Err(PennywiseError::Validation(e.to_string().trim_end().to_string())),
        },
    }
}

impl LineCommand {
    fn into_action(self) -> PennywiseResult<Action> {
        let command = match self {
            LineCommand::Add {
                description,
                price,
                category,
                time,
            } => Command::AddExpense {
                description,
                price: parse_money(&price)?,
                category: parse_category(&category)?,
                timestamp: parse_optional(time, parse_timestamp)?,
            },
            LineCommand::Menu { item: None, .. } => return Ok(Action::ShowMenu),
            LineCommand::Menu {
                item: Some(item),
                time,
            } => Command::AddMenuExpense {
                item,
                timestamp: parse_optional(time, parse_timestamp)?,
            },
            LineCommand::Edit {
                id,
                description,
                price,
                category,
                time,
            } => Command::EditExpense {
                reference: id,
                edit: ExpenseEdit {
                    description,
                    price: parse_optional(price, parse_money)?,
                    category: parse_optional(category, parse_category)?,
                    timestamp: parse_optional(time, parse_timestamp)?,
                },
            },
            LineCommand::Delete { id } => Command::DeleteExpense { reference: id },
            LineCommand::List {
                category,
                budget,
                search,
                period,
            } => {
                return Ok(Action::ListExpenses(ExpenseFilter {
                    category: parse_optional(category, parse_category)?,
                    budget,
                    search,
                    current_period: period,
                }))
            }
            LineCommand::Budget(line) => return line.into_action(),
            LineCommand::Budgets => return Ok(Action::ListBudgets),
            LineCommand::Event(line) => return line.into_action(),
            LineCommand::Events => return Ok(Action::ListEvents { upcoming: false }),
            LineCommand::Stats { from, to } => Command::Stats {
                start: parse_optional(from, parse_date)?,
                end: parse_optional(to, parse_date)?,
            },
            LineCommand::Undo => Command::Undo,
            LineCommand::Redo => Command::Redo,
            LineCommand::History { audit } => return Ok(Action::ShowHistory { audit }),
            LineCommand::Exit => return Ok(Action::Exit),
        };
        Ok(Action::Execute(command))
    }
}

impl BudgetLine {
    fn into_action(self) -> PennywiseResult<Action> {
        let command = match self {
            BudgetLine::Add {
                name,
                cap,
                period,
                start,
                no_switch,
            } => Command::AddBudget {
                name,
                cap: parse_money(&cap)?,
                period: parse_period(&period)?,
                start_date: parse_optional(start, parse_date)?,
                make_primary: !no_switch,
            },
            BudgetLine::Edit {
                name,
                name_to,
                cap,
                period,
            } => Command::EditBudget {
                name,
                edit: BudgetEdit {
                    name: name_to,
                    cap: parse_optional(cap, parse_money)?,
                    period: parse_optional(period, parse_period)?,
                },
            },
            BudgetLine::Delete { name } => Command::DeleteBudget { name },
            BudgetLine::Switch { name } => Command::SwitchBudget { name },
            BudgetLine::List => return Ok(Action::ListBudgets),
            BudgetLine::Show { name } => return Ok(Action::ShowBudget { name }),
            BudgetLine::Past { date } => Command::PastPeriod {
                date: parse_date(&date)?,
            },
            BudgetLine::Reset => Command::ResetPeriod,
        };
        Ok(Action::Execute(command))
    }
}

impl EventLine {
    fn into_action(self) -> PennywiseResult<Action> {
        let command = match self {
            EventLine::Add {
                description,
                price,
                time,
                category,
            } => Command::AddEvent {
                description,
                price: parse_money(&price)?,
                category: parse_category(&category)?,
                timestamp: parse_timestamp(&time)?,
            },
            EventLine::Edit {
                id,
                description,
                price,
                category,
                time,
            } => Command::EditEvent {
                reference: id,
                edit: ExpenseEdit {
                    description,
                    price: parse_optional(price, parse_money)?,
                    category: parse_optional(category, parse_category)?,
                    timestamp: parse_optional(time, parse_timestamp)?,
                },
            },
            EventLine::Delete { id } => Command::DeleteEvent { reference: id },
            EventLine::List { upcoming } => return Ok(Action::ListEvents { upcoming }),
        };
        Ok(Action::Execute(command))
    }
}
