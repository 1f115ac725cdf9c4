use thiserror::Error;

use crate::domain::entities::CardPurchase;

pub const HELP_TEXT: &str = "\
commands:
  user <name>            set the username to validate
  amount <n>             set the required amount
  validate               check eligibility with the bingo service
  set <field> <value>    edit the purchase form
                         fields: user-id username card draw date amount reference pdf
  random                 fill the purchase form with random data
  purchase               buy the card (requires a validated user)
  status                 show forms, connection and last results
  log                    show the activity log
  clear-log              clear the activity log
  help                   show this text
  quit | exit            leave";

// One edit of the purchase form, already parsed to the field's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseEdit {
    UserId(String),
    Username(String),
    Card(u32),
    Draw(u32),
    Date(String),
    Amount(u64),
    Reference(String),
    Pdf(String),
}

impl PurchaseEdit {
    pub fn apply(self, purchase: &mut CardPurchase) {
        match self {
            PurchaseEdit::UserId(value) => purchase.user_id = value,
            PurchaseEdit::Username(value) => purchase.username = value,
            PurchaseEdit::Card(value) => purchase.numero_carton = value,
            PurchaseEdit::Draw(value) => purchase.sorteo = value,
            PurchaseEdit::Date(value) => purchase.fecha_sorteo = value,
            PurchaseEdit::Amount(value) => purchase.monto = value,
            PurchaseEdit::Reference(value) => purchase.referencia_venta = value,
            PurchaseEdit::Pdf(value) => purchase.nombre_archivo_pdf = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Help,
    User(String),
    Amount(u64),
    Validate,
    Set(PurchaseEdit),
    Random,
    Purchase,
    Status,
    Log,
    ClearLog,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command `{0}`, try `help`")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown field `{0}`, expected one of: user-id username card draw date amount reference pdf")]
    UnknownField(String),
    #[error("`{value}` is not a valid {field}")]
    InvalidNumber { field: &'static str, value: String },
}

// Parse one console line. Blank lines yield Ok(None).
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => ConsoleCommand::Help,
        "user" => ConsoleCommand::User(rest.to_string()),
        "amount" => {
            if rest.is_empty() {
                return Err(ParseError::Usage("amount <n>"));
            }
            ConsoleCommand::Amount(parse_number(rest, "amount")?)
        }
        "validate" => ConsoleCommand::Validate,
        "set" => ConsoleCommand::Set(parse_edit(rest)?),
        "random" => ConsoleCommand::Random,
        "purchase" | "buy" => ConsoleCommand::Purchase,
        "status" => ConsoleCommand::Status,
        "log" => ConsoleCommand::Log,
        "clear-log" => ConsoleCommand::ClearLog,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

fn parse_edit(rest: &str) -> Result<PurchaseEdit, ParseError> {
    let (field, value) = match rest.split_once(char::is_whitespace) {
        Some((field, value)) => (field, value.trim()),
        None if !rest.is_empty() => (rest, ""),
        None => return Err(ParseError::Usage("set <field> <value>")),
    };

    let edit = match field.to_ascii_lowercase().as_str() {
        "user-id" => PurchaseEdit::UserId(value.to_string()),
        "username" => PurchaseEdit::Username(value.to_string()),
        "card" => PurchaseEdit::Card(parse_number(value, "card number")?),
        "draw" => PurchaseEdit::Draw(parse_number(value, "draw number")?),
        "date" => PurchaseEdit::Date(value.to_string()),
        "amount" => PurchaseEdit::Amount(parse_number(value, "amount")?),
        "reference" => PurchaseEdit::Reference(value.to_string()),
        "pdf" => PurchaseEdit::Pdf(value.to_string()),
        other => return Err(ParseError::UnknownField(other.to_string())),
    };

    Ok(edit)
}

fn parse_number<T: std::str::FromStr>(value: &str, field: &'static str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
