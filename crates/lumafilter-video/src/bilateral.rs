use lumafilter_image::{Frame, FrameMut};
use lumafilter_imgproc::filter::bilateral_frame;
use lumafilter_imgproc::padding::PaddingMode;

use crate::control::{handle_navigation_event, NavigationEvent};
use crate::element::{ElementMetadata, VideoFilter};
use crate::error::VideoFilterError;
use crate::params::{BilateralParams, SIGMA_MAX, SIGMA_MIN};
use crate::property::{find_property, PropertyKind, PropertySpec, PropertyValue};
use crate::store::ParamStore;

static METADATA: ElementMetadata = ElementMetadata {
    long_name: "Bilateral filter",
    classification: "Generic",
    description: "Separable bilateral gaussian video filter",
    author: "Jakob",
};

static PROPERTIES: [PropertySpec; 3] = [
    PropertySpec {
        name: "sigmad",
        nick: "Sigma domain",
        blurb: "Sigma of the domain kernel",
        kind: PropertyKind::Double {
            min: SIGMA_MIN,
            max: SIGMA_MAX,
            default: 2.0,
        },
    },
    PropertySpec {
        name: "sigmar",
        nick: "Sigma range",
        blurb: "Sigma of the intensity range gaussian",
        kind: PropertyKind::Double {
            min: SIGMA_MIN,
            max: SIGMA_MAX,
            default: 25.0,
        },
    },
    PropertySpec {
        name: "filtering",
        nick: "Filtering",
        blurb: "Whether the filter is applied",
        kind: PropertyKind::Bool { default: false },
    },
];

/// Separable bilateral filter on the luma plane of I420 video.
///
/// Filtering starts disabled. The chroma planes of the output are always set
/// to mid-gray.
#[derive(Debug, Default)]
pub struct BilateralFilter {
    params: ParamStore<BilateralParams>,
    padding: PaddingMode,
}

impl BilateralFilter {
    /// Factory name of the element.
    pub const NAME: &'static str = "bilateralfilter";

    /// Create a filter with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter with the given parameters.
    pub fn with_params(params: BilateralParams) -> Result<Self, VideoFilterError> {
        params.validate()?;
        Ok(Self {
            params: ParamStore::new(params),
            padding: PaddingMode::default(),
        })
    }

    /// Use a different border mode than zero padding.
    pub fn with_padding(mut self, padding: PaddingMode) -> Self {
        self.padding = padding;
        self
    }

    /// A handle to the shared parameters.
    pub fn params(&self) -> ParamStore<BilateralParams> {
        self.params.clone()
    }
}

impl VideoFilter for BilateralFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn metadata(&self) -> &'static ElementMetadata {
        &METADATA
    }

    fn properties(&self) -> &'static [PropertySpec] {
        &PROPERTIES
    }

    fn set_property(&self, name: &str, value: PropertyValue) -> Result<(), VideoFilterError> {
        let value = find_property(&PROPERTIES, name)
            .and_then(|spec| spec.check(value))
            .map_err(|e| {
                log::warn!("Rejected property {name}: {e}");
                e
            })?;
        let mut params = self.params.lock()?;

        match (name, value) {
            ("sigmad", PropertyValue::Double(v)) => params.sigma_d = v,
            ("sigmar", PropertyValue::Double(v)) => params.sigma_r = v,
            ("filtering", PropertyValue::Bool(v)) => params.filtering = v,
            _ => return Err(VideoFilterError::UnknownProperty(name.to_string())),
        }

        log::info!("{} set to {value}", name);
        Ok(())
    }

    fn property(&self, name: &str) -> Result<PropertyValue, VideoFilterError> {
        find_property(&PROPERTIES, name)?;
        let params = self.params.lock()?;

        match name {
            "sigmad" => Ok(PropertyValue::Double(params.sigma_d)),
            "sigmar" => Ok(PropertyValue::Double(params.sigma_r)),
            "filtering" => Ok(PropertyValue::Bool(params.filtering)),
            _ => Err(VideoFilterError::UnknownProperty(name.to_string())),
        }
    }

    fn src_event(&self, event: &NavigationEvent) -> Result<bool, VideoFilterError> {
        handle_navigation_event(&self.params, event)?;
        Ok(true)
    }

    fn transform_frame(&self, src: &Frame, dst: &mut FrameMut) -> Result<(), VideoFilterError> {
        let params = self.params.lock()?;
        bilateral_frame(
            src,
            dst,
            params.sigma_d as f32,
            params.sigma_r as f32,
            params.filtering,
            self.padding,
        )?;
        Ok(())
    }
}
