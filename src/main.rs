//! SkillSwap batch driver: one JSON request on stdin, one JSON response on stdout.
//!
//! ```text
//! {"op":"match","wanted":["python"],"candidates":[{"id":1,"skills_offered":["python programming"]}],"top_k":5}
//! {"op":"moderate","content":"hello","content_type":"message"}
//! {"op":"skills","query":"python","candidates":["python programming","guitar"]}
//! ```

use std::io::{self, Read, Write};

use mimalloc::MiMalloc;
use serde::{Deserialize, Serialize};

use skillswap::config::EngineConfig;
use skillswap::engine::SkillSwapEngine;
use skillswap::matching::{CandidateProfile, MatchResult};
use skillswap::moderation::{ContentType, ModerationVerdict};
use skillswap::scoring::SkillMatch;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum Request {
    Match {
        wanted: Vec<String>,
        candidates: Vec<CandidateProfile>,
        #[serde(default)]
        top_k: Option<usize>,
    },
    Moderate {
        content: String,
        #[serde(default)]
        content_type: Option<String>,
    },
    Skills {
        query: String,
        candidates: Vec<String>,
        #[serde(default)]
        threshold: Option<f32>,
    },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response {
    Matches { matches: Vec<MatchResult> },
    Verdict(ModerationVerdict),
    Skills { matches: Vec<SkillMatch> },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = EngineConfig::from_env()?;
    let engine = SkillSwapEngine::from_config(&config)?;

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let request: Request = serde_json::from_str(&input)?;

    tracing::debug!(?request, "Handling request");

    let response = match request {
        Request::Match {
            wanted,
            candidates,
            top_k,
        } => Response::Matches {
            matches: engine.rank_matches(&wanted, &candidates, top_k),
        },
        Request::Moderate {
            content,
            content_type,
        } => {
            let content_type = match content_type {
                Some(tag) => tag.parse::<ContentType>()?,
                None => ContentType::default(),
            };
            Response::Verdict(engine.moderate(&content, content_type))
        }
        Request::Skills {
            query,
            candidates,
            threshold,
        } => Response::Skills {
            matches: engine.ranked_skill_matches(&query, &candidates, threshold),
        },
    };

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &response)?;
    writeln!(stdout)?;

    Ok(())
}
