// src/api/dto/replay_dto.rs

use crate::domain::{player_model, replay_model};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct PlayerResponse {
    pub player_guid: Uuid,
    pub player_ic_name: String,
    pub player_ooc_name: String,
    pub antag: bool,
    pub job_prototypes: Vec<String>,
    pub antag_prototypes: Vec<String>,
    pub redacted: bool,
}

impl From<player_model::Model> for PlayerResponse {
    fn from(player: player_model::Model) -> Self {
        Self {
            player_guid: player.player_guid,
            player_ic_name: player.player_ic_name,
            player_ooc_name: player.player_ooc_name,
            antag: player.antag,
            job_prototypes: player.job_prototypes.0,
            antag_prototypes: player.antag_prototypes.0,
            redacted: player.redacted,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReplayResponse {
    pub id: i32,
    pub link: Option<String>,
    pub map: Option<String>,
    pub gamemode: Option<String>,
    pub server_id: String,
    pub server_name: Option<String>,
    pub duration: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub round_id: Option<i32>,
    pub end_tick: i32,
    pub end_time: Option<String>,
    pub file_count: i32,
    pub size: i32,
    pub uncompressed_size: i32,
    pub round_end_text: Option<String>,
    pub round_end_players: Vec<PlayerResponse>,
}

impl ReplayResponse {
    pub fn from_parts(replay: replay_model::Model, players: Vec<player_model::Model>) -> Self {
        Self {
            id: replay.id,
            link: replay.link,
            map: replay.map,
            gamemode: replay.gamemode,
            server_id: replay.server_id,
            server_name: replay.server_name,
            duration: replay.duration,
            date: replay.date,
            round_id: replay.round_id,
            end_tick: replay.end_tick,
            end_time: replay.end_time,
            file_count: replay.file_count,
            size: replay.size,
            uncompressed_size: replay.uncompressed_size,
            round_end_text: replay.round_end_text,
            round_end_players: players.into_iter().map(Into::into).collect(),
        }
    }
}

/// 一覧用の軽量表現。参加レコードは含めない
#[derive(Debug, Serialize)]
pub struct ReplaySummaryResponse {
    pub id: i32,
    pub map: Option<String>,
    pub gamemode: Option<String>,
    pub server_id: String,
    pub server_name: Option<String>,
    pub duration: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub round_id: Option<i32>,
}

impl From<replay_model::Model> for ReplaySummaryResponse {
    fn from(replay: replay_model::Model) -> Self {
        Self {
            id: replay.id,
            map: replay.map,
            gamemode: replay.gamemode,
            server_id: replay.server_id,
            server_name: replay.server_name,
            duration: replay.duration,
            date: replay.date,
            round_id: replay.round_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReplayListResponse {
    pub replays: Vec<ReplaySummaryResponse>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    32
}

#[derive(Debug, Deserialize)]
pub struct ReplayListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}
