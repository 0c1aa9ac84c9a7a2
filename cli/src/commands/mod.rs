mod helpers;
mod meal;
mod settings;
mod suggest;
mod transfer;

use dinner_core::session::Session;
use dinner_core::storage::SqliteStore;

pub(crate) use helpers::StdinConfirm;
pub(crate) use meal::{cmd_add, cmd_list, cmd_quick_add, cmd_remove};
pub(crate) use settings::{cmd_avoid_recent, cmd_clear, cmd_defaults, cmd_reset};
pub(crate) use suggest::{cmd_stats, cmd_suggest};
pub(crate) use transfer::{cmd_export, cmd_import};

pub(crate) type AppSession = Session<SqliteStore>;
