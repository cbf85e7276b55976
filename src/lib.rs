//! # Zen Press
//!
//! A minimal static site generator for a JSON-driven blog, plus the page
//! logic its generated site runs client-side.
//!
//! # Architecture: Load → Build
//!
//! The build is a two-stage pipeline over plain files:
//!
//! ```text
//! 1. Load    data/      →  articles + manifests   (JSON → structured data)
//! 2. Build   templates  →  out/                   (placeholder substitution)
//! ```
//!
//! Loading reads one JSON file per article, the `index.json` home manifest,
//! and the `archive.json` archive manifest. Building substitutes values into
//! three `{{PLACEHOLDER}}` HTML templates and writes the home page, the
//! archive page, one directory per article, and `sitemap.xml`. Article pages
//! fan out across a rayon pool (each writes a distinct path); the sitemap
//! waits for the fan-in since it needs the final sorted list.
//!
//! Failures split into two severities: missing templates, an unreadable home
//! manifest, or any write failure abort the run; a single bad article file,
//! a manifest id with no matching article, or an unresolvable archive entry
//! are warned and skipped.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`load`] | Stage 1 — reads article JSON files and manifests, collects skip warnings |
//! | [`build`] | Stage 2 — renders and writes home, archive, article pages, sitemap |
//! | [`template`] | Single-pass `{{NAME}}` substitution, HTML escaping, script-safe JSON |
//! | [`render`] | Card and archive-item fragments shared by build and client |
//! | [`seo`] | Meta description, canonical URLs, Open Graph tags, JSON-LD block |
//! | [`sitemap`] | `sitemap.xml` entries with per-page-type priorities |
//! | [`dates`] | Timestamp parsing, French formatting, newest-first ordering |
//! | [`config`] | `site.toml` loading and the `SITE_URL` override |
//! | [`types`] | Article and manifest records shared by every stage |
//! | [`output`] | CLI build report formatting |
//! | [`client`] | Client-side behavior as pure state: data access with embedded fallback, filtering, theme toggle |
//!
//! # Design Decisions
//!
//! ## String Templates Over a Template Engine
//!
//! Page shells are hand-maintained HTML files with `{{NAME}}` tokens, and
//! rendering is one regex pass mapping each token to a value (or to the
//! empty string). There is no recursion, no logic in templates, and no
//! engine to version: the entire contract is "token in, value out", which
//! keeps the templates editable by anyone who can write HTML.
//!
//! ## The Client Logic Lives Here Too
//!
//! Everything the browser script decides — which cards are visible, where
//! data comes from when `fetch` fails, which theme applies — is pure
//! computation, so it is implemented and tested in this crate behind small
//! traits ([`client::data::Fetch`], [`client::theme::PreferenceStore`]).
//! The DOM layer stays a thin shell that applies decisions made here.
//!
//! ## Lenient Data, Strict Skeleton
//!
//! The data files are hand-edited, so every per-item problem degrades to a
//! warning and an omission. Only the structural inputs (templates, the home
//! manifest, the filesystem) can abort a build.

pub mod build;
pub mod client;
pub mod config;
pub mod dates;
pub mod load;
pub mod output;
pub mod render;
pub mod seo;
pub mod sitemap;
pub mod template;
pub mod types;
