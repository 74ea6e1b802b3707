mod create_entity;
mod get_entity;
mod list_entities;
mod update_entity;

use super::*;
