//! The generate-or-fetch state machine.
//!
//! ```text
//! CHECK_CACHE --hit--> DONE (cached)
//!      |
//!     miss
//!      v
//! GENERATE -> PARSE_NAME -> PERSIST -> DONE (fresh)
//! ```
//!
//! Any stage may fail; failures are converted to [`CoreError`] at this
//! boundary and nothing partially built is returned. A missing or
//! out-of-range suggested name is not a failure: the deterministic
//! fallback name is used instead.

use std::sync::Arc;

use v0mon_core::element::{build_personality, TypePair};
use v0mon_core::error::CoreError;
use v0mon_core::handle::Handle;
use v0mon_core::naming::{default_description, extract_suggested_name, fallback_name, strip_name_line};
use v0mon_core::prompt::{build_prompt, flavor_traits};
use v0mon_core::typing::select_types_random;
use v0mon_db::models::creature::CreateCreature;
use v0mon_genai::{ContentPart, GenAiApi};

use crate::config::PipelineConfig;
use crate::ports::{CreatureStore, ImageGenerator, ObjectStorage, StoreError};
use crate::result::GenerationResult;

/// Extension of every stored artifact. The storage key is
/// `{handle}.{ARTWORK_EXTENSION}` and nothing else.
pub const ARTWORK_EXTENSION: &str = "png";

/// Content type used when the generator reports an empty MIME type.
const FALLBACK_CONTENT_TYPE: &str = "image/png";

// ---------------------------------------------------------------------------
// Internal error type
// ---------------------------------------------------------------------------

/// Failure inside a single pass. Kept separate from [`CoreError`] so the
/// retry path can tell a lost insert race from other persistence errors.
#[derive(Debug)]
enum RunError {
    Core(CoreError),
    Duplicate(String),
}

impl From<CoreError> for RunError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<RunError> for CoreError {
    fn from(err: RunError) -> Self {
        match err {
            RunError::Core(core) => core,
            RunError::Duplicate(handle) => {
                CoreError::Persistence(format!("A creature for @{handle} was created concurrently"))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Response part selection
// ---------------------------------------------------------------------------

/// The parts of a generator response the pipeline acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedParts {
    /// First text part, if any.
    pub text: Option<String>,
    /// First inline-data part as `(mime_type, bytes)`, if any.
    pub image: Option<(String, Vec<u8>)>,
}

/// Pick the first text part and the first inline-data part; later parts
/// of either kind are ignored.
pub fn select_parts(parts: Vec<ContentPart>) -> SelectedParts {
    let mut selected = SelectedParts {
        text: None,
        image: None,
    };
    for part in parts {
        match part {
            ContentPart::Text(text) if selected.text.is_none() => selected.text = Some(text),
            ContentPart::InlineData { mime_type, data } if selected.image.is_none() => {
                selected.image = Some((mime_type, data));
            }
            _ => {}
        }
    }
    selected
}

/// Resolve the creature name from the generator's text, falling back to
/// the deterministic handle-derived name.
pub fn resolve_name(handle: &Handle, text: Option<&str>) -> String {
    match text.and_then(extract_suggested_name) {
        Some(name) => name,
        None => {
            let name = fallback_name(handle.as_str());
            tracing::info!(handle = %handle, creature_name = %name, "No usable suggested name, using fallback");
            name
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// A completed GENERATE stage.
struct Generated {
    types: TypePair,
    content_type: String,
    image: Vec<u8>,
    text: Option<String>,
}

/// Runs the generate-or-fetch flow for one handle at a time.
///
/// Cheap to share behind an `Arc`; holds no per-request state.
pub struct CreatureOrchestrator {
    store: Arc<dyn CreatureStore>,
    storage: Arc<dyn ObjectStorage>,
    generator: Option<Arc<dyn ImageGenerator>>,
}

impl CreatureOrchestrator {
    /// Assemble an orchestrator from explicit collaborators.
    ///
    /// A `None` generator means no API credential is configured.
    pub fn new(
        store: Arc<dyn CreatureStore>,
        storage: Arc<dyn ObjectStorage>,
        generator: Option<Arc<dyn ImageGenerator>>,
    ) -> Self {
        Self {
            store,
            storage,
            generator,
        }
    }

    /// Build the production generator from `config` and assemble.
    pub fn from_config(
        config: &PipelineConfig,
        store: Arc<dyn CreatureStore>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Result<Self, CoreError> {
        let generator = match &config.genai {
            Some(genai) => {
                let api = GenAiApi::new(genai.clone()).map_err(|e| {
                    CoreError::Configuration(format!("Failed to build generation client: {e}"))
                })?;
                Some(Arc::new(api) as Arc<dyn ImageGenerator>)
            }
            None => None,
        };
        Ok(Self::new(store, storage, generator))
    }

    /// Whether a generator credential is configured.
    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Object storage used for artifacts.
    pub fn storage(&self) -> &Arc<dyn ObjectStorage> {
        &self.storage
    }

    /// Normalize `raw_handle` and run the full flow once.
    pub async fn resolve(&self, raw_handle: &str) -> Result<GenerationResult, CoreError> {
        let handle = Handle::parse(raw_handle)?;
        self.run(&handle).await.map_err(CoreError::from)
    }

    /// Like [`resolve`](Self::resolve), but after losing an insert race to
    /// a concurrent request for the same handle, re-enters the cache check
    /// once and returns the winner's record.
    pub async fn resolve_with_retry(&self, raw_handle: &str) -> Result<GenerationResult, CoreError> {
        let handle = Handle::parse(raw_handle)?;
        match self.run(&handle).await {
            Err(RunError::Duplicate(_)) => {
                tracing::info!(handle = %handle, "Lost insert race, re-checking cache");
                match self.check_cache(&handle).await? {
                    Some(hit) => Ok(hit),
                    None => Err(RunError::Duplicate(handle.to_string()).into()),
                }
            }
            other => other.map_err(CoreError::from),
        }
    }

    async fn run(&self, handle: &Handle) -> Result<GenerationResult, RunError> {
        if let Some(hit) = self.check_cache(handle).await? {
            return Ok(hit);
        }

        tracing::info!(handle = %handle, "Cache miss, generating creature");
        let generated = self.generate(handle).await?;
        let creature_name = resolve_name(handle, generated.text.as_deref());
        self.persist(handle, generated, creature_name).await
    }

    // ---- stages ----

    /// CHECK_CACHE: look up an existing record.
    async fn check_cache(&self, handle: &Handle) -> Result<Option<GenerationResult>, CoreError> {
        let record = self
            .store
            .find_by_handle(handle.as_str())
            .await
            .map_err(|e| {
                tracing::error!(handle = %handle, error = %e, "Creature lookup failed");
                CoreError::Persistence(e.to_string())
            })?;

        match record {
            Some(record) => {
                let hit = GenerationResult::from_record(record)?;
                tracing::info!(
                    handle = %handle,
                    creature_name = %hit.creature_name,
                    cached = true,
                    "Serving existing creature"
                );
                Ok(Some(hit))
            }
            None => Ok(None),
        }
    }

    /// GENERATE: pick types, build the prompt and call the generator once.
    async fn generate(&self, handle: &Handle) -> Result<Generated, CoreError> {
        let generator = self.generator.as_ref().ok_or_else(|| {
            CoreError::Configuration(
                "Generation API key not configured. Set GOOGLE_GENAI_API_KEY".into(),
            )
        })?;

        let types = select_types_random();
        let personality = build_personality(&types);
        let mut traits = personality.traits;
        traits.extend(flavor_traits(handle));
        let prompt = build_prompt(handle, &types, &personality.description, &traits);

        tracing::debug!(handle = %handle, types = %types.describe(), "Submitting prompt");

        let parts = generator
            .generate(&prompt)
            .await
            .map_err(|e| {
                tracing::error!(handle = %handle, error = %e, "Generation request failed");
                CoreError::Generation(format!("Generation request failed: {e}"))
            })?
            .ok_or_else(|| CoreError::Generation("No image generated".into()))?;

        let selected = select_parts(parts);
        let (mime_type, image) = selected
            .image
            .ok_or_else(|| CoreError::Generation("No image data found in response".into()))?;

        let content_type = if mime_type.is_empty() {
            FALLBACK_CONTENT_TYPE.to_string()
        } else {
            mime_type
        };

        Ok(Generated {
            types,
            content_type,
            image,
            text: selected.text,
        })
    }

    /// PERSIST: upload the artwork, then insert the record.
    ///
    /// The record is looked up again first so a creature stored by a
    /// concurrent request while this one was generating keeps its artwork.
    async fn persist(
        &self,
        handle: &Handle,
        generated: Generated,
        creature_name: String,
    ) -> Result<GenerationResult, RunError> {
        if self.check_cache(handle).await?.is_some() {
            tracing::warn!(handle = %handle, "Creature stored concurrently, skipping upload");
            return Err(RunError::Duplicate(handle.to_string()));
        }

        let key = handle.storage_key(ARTWORK_EXTENSION);
        let location = self
            .storage
            .put(&key, generated.image, &generated.content_type)
            .await
            .map_err(|e| {
                tracing::error!(handle = %handle, key = %key, error = %e, "Artwork upload failed");
                CoreError::Persistence(format!("Failed to store artwork: {e}"))
            })?;

        let input = CreateCreature::new(handle, location, &generated.types, creature_name);
        let record = self.store.insert(&input).await.map_err(|e| match e {
            StoreError::Duplicate(h) => {
                tracing::warn!(handle = %handle, "Creature inserted concurrently");
                RunError::Duplicate(h)
            }
            StoreError::Backend(msg) => {
                tracing::error!(handle = %handle, error = %msg, "Creature insert failed");
                RunError::Core(CoreError::Persistence(msg))
            }
        })?;

        tracing::info!(
            handle = %handle,
            creature_name = %record.creature_name,
            location = %record.image_location,
            cached = false,
            "Created new creature"
        );

        let description = generated
            .text
            .as_deref()
            .and_then(strip_name_line)
            .unwrap_or_else(|| default_description(&record.creature_name, &record.handle));

        Ok(GenerationResult {
            handle: record.handle,
            image_location: record.image_location,
            creature_name: record.creature_name,
            types: generated.types,
            description,
            cached: false,
        })
    }
}
