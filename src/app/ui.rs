mod center;
mod dialogs;
mod info;
mod prompt;
mod side;
mod top;
