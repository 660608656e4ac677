use std::{collections::BTreeMap, fmt, io, sync::Arc};

#[derive(Debug, Clone)]
pub struct FolioError {
    pub key: &'static str,
    pub args: BTreeMap<&'static str, String>,
    pub causes: Vec<FolioCause>,
}

#[derive(Debug, Clone)]
pub enum FolioCause {
    Folio(Box<FolioError>),
    Std(Arc<dyn std::error::Error + Send + Sync>),
}

impl FolioError {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            args: BTreeMap::new(),
            causes: Vec::new(),
        }
    }

    pub fn with_arg(mut self, k: &'static str, v: impl ToString) -> Self {
        self.args.insert(k, v.to_string());
        self
    }

    pub fn push_folio(mut self, cause: FolioError) -> Self {
        self.causes.push(FolioCause::Folio(Box::new(cause)));
        self
    }

    pub fn push_std(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.causes.push(FolioCause::Std(Arc::new(cause)));
        self
    }
}

impl fmt::Display for FolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.key)?;
        let mut first = true;
        for (k, v) in &self.args {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{k}={v}")?;
        }
        write!(f, ")")?;
        for cause in &self.causes {
            match cause {
                FolioCause::Folio(e) => write!(f, ": {e}")?,
                FolioCause::Std(e) => write!(f, ": {e}")?,
            }
        }
        Ok(())
    }
}

impl std::error::Error for FolioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes.iter().find_map(|c| match c {
            FolioCause::Folio(e) => Some(e.as_ref() as &dyn std::error::Error),
            FolioCause::Std(e) => Some(e.as_ref() as &(dyn std::error::Error + 'static)),
        })
    }
}

impl From<String> for FolioError {
    fn from(s: String) -> Self {
        FolioError::new("string-error").with_arg("msg", s)
    }
}

impl From<&str> for FolioError {
    fn from(s: &str) -> Self {
        FolioError::new("str-error").with_arg("msg", s)
    }
}

impl From<io::Error> for FolioError {
    fn from(err: io::Error) -> Self {
        FolioError::new("io-error").push_std(err)
    }
}

impl From<gltf::Error> for FolioError {
    fn from(err: gltf::Error) -> Self {
        FolioError::new("gltf-error").push_std(err)
    }
}

impl From<image::ImageError> for FolioError {
    fn from(err: image::ImageError) -> Self {
        FolioError::new("image-error").push_std(err)
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::new("json-error").push_std(err)
    }
}

impl From<tokio::task::JoinError> for FolioError {
    fn from(err: tokio::task::JoinError) -> Self {
        FolioError::new("join-error").push_std(err)
    }
}

impl From<wgpu::CreateSurfaceError> for FolioError {
    fn from(err: wgpu::CreateSurfaceError) -> Self {
        FolioError::new("wgpu::CreateSurfaceError").push_std(err)
    }
}

impl From<wgpu::RequestAdapterError> for FolioError {
    fn from(err: wgpu::RequestAdapterError) -> Self {
        FolioError::new("wgpu::RequestAdapterError").push_std(err)
    }
}

impl From<wgpu::RequestDeviceError> for FolioError {
    fn from(err: wgpu::RequestDeviceError) -> Self {
        FolioError::new("wgpu::RequestDeviceError").push_std(err)
    }
}

impl From<winit::error::EventLoopError> for FolioError {
    fn from(err: winit::error::EventLoopError) -> Self {
        FolioError::new("winit::error::EventLoopError").push_std(err)
    }
}

impl From<winit::error::OsError> for FolioError {
    fn from(err: winit::error::OsError) -> Self {
        FolioError::new("winit::error::OsError").push_std(err)
    }
}
