use lumafilter_image::{Frame, FrameMut};
use lumafilter_imgproc::filter::{gaussian_blur_frame, BlurMode};
use lumafilter_imgproc::padding::PaddingMode;

use crate::control::{handle_navigation_event, NavigationEvent};
use crate::element::{ElementMetadata, VideoFilter};
use crate::error::VideoFilterError;
use crate::params::{BlurParams, SIGMA_MAX, SIGMA_MIN};
use crate::property::{find_property, PropertyKind, PropertySpec, PropertyValue};
use crate::store::ParamStore;

static METADATA: ElementMetadata = ElementMetadata {
    long_name: "Blur filter",
    classification: "Generic",
    description: "Low and High pass smooth gaussian video filter",
    author: "Jakob",
};

static PROPERTIES: [PropertySpec; 2] = [
    PropertySpec {
        name: "sigma",
        nick: "Sigma",
        blurb: "Sigma of the gaussian kernel",
        kind: PropertyKind::Double {
            min: SIGMA_MIN,
            max: SIGMA_MAX,
            default: 0.0,
        },
    },
    PropertySpec {
        name: "filtering",
        nick: "Filtering",
        blurb: "-1 for low-pass, 0 for off, 1 for high-pass",
        kind: PropertyKind::Int {
            min: -1,
            max: 1,
            default: 0,
        },
    },
];

/// Gaussian low/high-pass filter on the luma plane of I420 video.
///
/// The chroma planes of the output are set to mid-gray.
///
/// # Example
///
/// ```
/// use lumafilter_video::{BlurFilter, VideoFilter};
/// use lumafilter_video::property::PropertyValue;
///
/// let filter = BlurFilter::new();
/// filter.set_property("filtering", PropertyValue::Int(-1)).unwrap();
/// filter.set_property("sigma", PropertyValue::Double(1.5)).unwrap();
/// assert_eq!(filter.property("sigma").unwrap(), PropertyValue::Double(1.5));
/// ```
#[derive(Debug, Default)]
pub struct BlurFilter {
    params: ParamStore<BlurParams>,
    padding: PaddingMode,
}

impl BlurFilter {
    /// Factory name of the element.
    pub const NAME: &'static str = "blurfilter";

    /// Create a filter with default parameters, which leave the luma untouched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter with the given parameters.
    pub fn with_params(params: BlurParams) -> Result<Self, VideoFilterError> {
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
    pub fn params(&self) -> ParamStore<BlurParams> {
        self.params.clone()
    }
}

impl VideoFilter for BlurFilter {
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
            ("sigma", PropertyValue::Double(sigma)) => params.sigma = sigma,
            ("filtering", PropertyValue::Int(mode)) => {
                params.mode = BlurMode::from_i32(mode).unwrap_or_default()
            }
            _ => return Err(VideoFilterError::UnknownProperty(name.to_string())),
        }

        log::info!("{} set to {value}", name);
        Ok(())
    }

    fn property(&self, name: &str) -> Result<PropertyValue, VideoFilterError> {
        find_property(&PROPERTIES, name)?;
        let params = self.params.lock()?;

        match name {
            "sigma" => Ok(PropertyValue::Double(params.sigma)),
            "filtering" => Ok(PropertyValue::Int(params.mode.as_i32())),
            _ => Err(VideoFilterError::UnknownProperty(name.to_string())),
        }
    }

    fn src_event(&self, event: &NavigationEvent) -> Result<bool, VideoFilterError> {
        handle_navigation_event(&self.params, event)?;
        Ok(true)
    }

    fn transform_frame(&self, src: &Frame, dst: &mut FrameMut) -> Result<(), VideoFilterError> {
        // held until the frame is written so events cannot change it midway
        let params = self.params.lock()?;
        gaussian_blur_frame(src, dst, params.sigma as f32, params.mode, self.padding)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::NavigationEventKind;
    use lumafilter_image::{VideoFormat, VideoFrame};

    #[test]
    fn properties_round_trip() -> Result<(), VideoFilterError> {
        let filter = BlurFilter::new();
        assert_eq!(filter.property("sigma")?, PropertyValue::Double(0.0));
        assert_eq!(filter.property("filtering")?, PropertyValue::Int(0));

        filter.set_property("filtering", PropertyValue::Int(1))?;
        filter.set_property("sigma", PropertyValue::Double(2.5))?;
        assert_eq!(filter.property("filtering")?, PropertyValue::Int(1));
        assert_eq!(filter.property("sigma")?, PropertyValue::Double(2.5));
        Ok(())
    }

    #[test]
    fn invalid_properties_are_rejected() -> Result<(), VideoFilterError> {
        let filter = BlurFilter::new();
        assert!(matches!(
            filter.set_property("filtering", PropertyValue::Int(2)),
            Err(VideoFilterError::PropertyOutOfRange { .. })
        ));
        assert!(matches!(
            filter.set_property("sigma", PropertyValue::Bool(true)),
            Err(VideoFilterError::InvalidPropertyType { .. })
        ));
        assert!(matches!(
            filter.property("sigmad"),
            Err(VideoFilterError::UnknownProperty(_))
        ));
        assert_eq!(filter.params().snapshot()?, BlurParams::default());
        Ok(())
    }

    #[test]
    fn events_are_forwarded() -> Result<(), VideoFilterError> {
        let filter = BlurFilter::new();
        assert!(filter.src_event(&NavigationEvent::key_release("+"))?);
        assert!(filter.src_event(&NavigationEvent::pointer(NavigationEventKind::MouseMove))?);
        assert_eq!(filter.property("filtering")?, PropertyValue::Int(1));
        assert_eq!(filter.property("sigma")?, PropertyValue::Double(0.5));
        Ok(())
    }

    #[test]
    fn off_copies_luma() -> Result<(), VideoFilterError> {
        let bytes = (0..VideoFrame::frame_len(VideoFormat::I420, [8, 6].into()))
            .map(|i| (i * 7 % 256) as u8)
            .collect::<Vec<_>>();
        let src = VideoFrame::from_bytes(VideoFormat::I420, [8, 6].into(), &bytes)?;

        let dst = BlurFilter::new().transform(&src)?;
        assert_eq!(dst.plane_data(0), src.plane_data(0));
        assert!(dst.plane_data(1).iter().all(|&v| v == 128));
        assert!(dst.plane_data(2).iter().all(|&v| v == 128));
        Ok(())
    }
}
