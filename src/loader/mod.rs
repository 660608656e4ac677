use crate::error::FolioError;
use crate::model::{Model, Transform};
use crate::parser::{load_gltf, load_image};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Texture applied to every mesh under the named nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureBinding {
    pub nodes: Vec<String>,
    pub texture: String,
}

impl TextureBinding {
    pub fn new(nodes: &[&str], texture: &str) -> Self {
        Self {
            nodes: nodes.iter().map(|n| n.to_string()).collect(),
            texture: texture.to_string(),
        }
    }
}

/// Everything needed to turn a file on disk into a placed, textured model.
#[derive(Debug, Clone)]
pub struct AssetJob {
    pub path: PathBuf,
    pub textures: Vec<(Vec<String>, PathBuf)>,
    pub root_transform: Transform,
}

pub struct LoadCompletion<K> {
    pub key: K,
    pub generation: u64,
    pub result: Result<Model, FolioError>,
}

/// Runs asset jobs on the tokio blocking pool and hands results back to the
/// frame loop through a channel.
pub struct AssetLoader<K> {
    runtime: Handle,
    sender: UnboundedSender<LoadCompletion<K>>,
    receiver: UnboundedReceiver<LoadCompletion<K>>,
    in_flight: usize,
}

impl<K: Send + 'static> AssetLoader<K> {
    pub fn new(runtime: Handle) -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            runtime,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    pub fn request(&mut self, key: K, generation: u64, job: AssetJob) {
        log::info!("Loading {} (generation {})", job.path.display(), generation);
        let sender = self.sender.clone();
        self.in_flight += 1;
        self.runtime.spawn(async move {
            let result = match tokio::task::spawn_blocking(move || load_asset(&job)).await {
                Ok(result) => result,
                Err(e) => Err(FolioError::from(e)),
            };
            let _ = sender.send(LoadCompletion {
                key,
                generation,
                result,
            });
        });
    }

    /// Drain every completion that has arrived since the last call.
    pub fn poll(&mut self) -> Vec<LoadCompletion<K>> {
        let mut done = Vec::new();
        while let Ok(completion) = self.receiver.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            done.push(completion);
        }
        done
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

/// Blocking body of a load: parse, place, texture. Texture failures are
/// logged and skipped; only the model itself can fail the job.
pub fn load_asset(job: &AssetJob) -> Result<Model, FolioError> {
    let mut model = load_gltf(&job.path).map_err(|e| {
        FolioError::new("asset-load")
            .with_arg("path", job.path.display())
            .push_folio(e)
    })?;
    model.root_transform = job.root_transform;

    for (nodes, texture_path) in &job.textures {
        match load_image(texture_path) {
            Ok(image) => {
                let slot = model.add_texture(image);
                let updated = model.assign_texture(nodes, slot);
                log::debug!(
                    "Applied {} to {} primitives ({:?})",
                    texture_path.display(),
                    updated,
                    nodes
                );
            }
            Err(e) => log::warn!("Skipping texture {}: {}", texture_path.display(), e),
        }
    }

    model.update_world_matrices();
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_asset_fails_with_path() {
        let job = AssetJob {
            path: PathBuf::from("nowhere/phone-model.glb"),
            textures: Vec::new(),
            root_transform: Transform::identity(),
        };
        let err = load_asset(&job).unwrap_err();
        assert_eq!(err.key, "asset-load");
        assert!(err.to_string().contains("nowhere/phone-model.glb"));
    }

    #[test]
    fn completions_arrive_through_poll() {
        let runtime = tokio::runtime::Runtime::new().expect("runtime");
        let mut loader: AssetLoader<&'static str> = AssetLoader::new(runtime.handle().clone());
        loader.request(
            "phone",
            7,
            AssetJob {
                path: PathBuf::from("nowhere.glb"),
                textures: Vec::new(),
                root_transform: Transform::identity(),
            },
        );
        assert_eq!(loader.in_flight(), 1);

        let mut done = Vec::new();
        for _ in 0..200 {
            done.extend(loader.poll());
            if !done.is_empty() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }

        assert_eq!(done.len(), 1);
        assert_eq!(done[0].key, "phone");
        assert_eq!(done[0].generation, 7);
        assert!(done[0].result.is_err());
        assert_eq!(loader.in_flight(), 0);
    }
}
