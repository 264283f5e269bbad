// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Target layer descriptors.
//!
//! Each [`TargetDescriptor`] serializes as a flat JSON object whose `"layer"`
//! key names the variant, followed by that variant's fields. The key
//! spelling (including the camel-case cropping keys) is what the consuming
//! inference engine reads, so field renames here are wire-format changes.

use serde::{Deserialize, Serialize};

/// One layer of the simplified target vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layer")]
pub enum TargetDescriptor {
    Input2D {
        height: usize,
        width: usize,
        channel: usize,
        batch: usize,
    },
    Convolution1D {
        kernel_size: usize,
        kernel_num: usize,
        stride: usize,
        padding: usize,
    },
    Convolution2D {
        kernel_height: usize,
        kernel_width: usize,
        kernel_num: usize,
        stride_hz: usize,
        stride_vl: usize,
        padding_hz: usize,
        padding_vl: usize,
    },
    Bias2D {
        units: usize,
    },
    Dense2D {
        units: usize,
    },
    AvgPooling1D {
        kernel_size: usize,
        stride: usize,
        padding: usize,
    },
    AvgPooling2D {
        kernel_height: usize,
        kernel_width: usize,
        stride_hz: usize,
        stride_vl: usize,
        padding_hz: usize,
        padding_vl: usize,
    },
    MaxPooling1D {
        kernel_size: usize,
        stride: usize,
        padding: usize,
    },
    MaxPooling2D {
        kernel_height: usize,
        kernel_width: usize,
        stride_hz: usize,
        stride_vl: usize,
        padding_hz: usize,
        padding_vl: usize,
    },
    GlobalMaxPooling1D,
    GlobalMaxPooling2D,
    GlobalAveragePooling1D,
    GlobalAveragePooling2D,
    Flatten,
    /// `-1` entries are passed through for the consumer to infer.
    Reshape {
        height: i64,
        width: i64,
        channel: i64,
    },
    Permute {
        dim1: usize,
        dim2: usize,
        dim3: usize,
    },
    RepeatVector {
        num: usize,
    },
    Cropping1D {
        #[serde(rename = "trimBegin")]
        trim_begin: usize,
        #[serde(rename = "trimEnd")]
        trim_end: usize,
    },
    Cropping2D {
        #[serde(rename = "topTrim")]
        top_trim: usize,
        #[serde(rename = "bottomTrim")]
        bottom_trim: usize,
        #[serde(rename = "leftTrim")]
        left_trim: usize,
        #[serde(rename = "rightTrim")]
        right_trim: usize,
    },
    ReLu,
    Softmax,
    ELu,
    HardSigmoid,
    Sigmoid,
    SoftPlus,
    SoftSign,
    TanH,
}

impl TargetDescriptor {
    /// Returns the `"layer"` tag this descriptor serializes with.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Input2D { .. } => "Input2D",
            Self::Convolution1D { .. } => "Convolution1D",
            Self::Convolution2D { .. } => "Convolution2D",
            Self::Bias2D { .. } => "Bias2D",
            Self::Dense2D { .. } => "Dense2D",
            Self::AvgPooling1D { .. } => "AvgPooling1D",
            Self::AvgPooling2D { .. } => "AvgPooling2D",
            Self::MaxPooling1D { .. } => "MaxPooling1D",
            Self::MaxPooling2D { .. } => "MaxPooling2D",
            Self::GlobalMaxPooling1D => "GlobalMaxPooling1D",
            Self::GlobalMaxPooling2D => "GlobalMaxPooling2D",
            Self::GlobalAveragePooling1D => "GlobalAveragePooling1D",
            Self::GlobalAveragePooling2D => "GlobalAveragePooling2D",
            Self::Flatten => "Flatten",
            Self::Reshape { .. } => "Reshape",
            Self::Permute { .. } => "Permute",
            Self::RepeatVector { .. } => "RepeatVector",
            Self::Cropping1D { .. } => "Cropping1D",
            Self::Cropping2D { .. } => "Cropping2D",
            Self::ReLu => "ReLu",
            Self::Softmax => "Softmax",
            Self::ELu => "ELu",
            Self::HardSigmoid => "HardSigmoid",
            Self::Sigmoid => "Sigmoid",
            Self::SoftPlus => "SoftPlus",
            Self::SoftSign => "SoftSign",
            Self::TanH => "TanH",
        }
    }

    /// Returns `true` for the kinds that own exactly one entry of the
    /// document's weight list.
    pub fn owns_weights(&self) -> bool {
        matches!(
            self,
            Self::Convolution1D { .. }
                | Self::Convolution2D { .. }
                | Self::Dense2D { .. }
                | Self::Bias2D { .. }
        )
    }

    /// Returns `true` for the tag-only activation kinds.
    pub fn is_activation(&self) -> bool {
        matches!(
            self,
            Self::ReLu
                | Self::Softmax
                | Self::ELu
                | Self::HardSigmoid
                | Self::Sigmoid
                | Self::SoftPlus
                | Self::SoftSign
                | Self::TanH
        )
    }
}

impl std::fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convolution2d_wire_format() {
        let d = TargetDescriptor::Convolution2D {
            kernel_height: 3,
            kernel_width: 5,
            kernel_num: 16,
            stride_hz: 2,
            stride_vl: 1,
            padding_hz: 0,
            padding_vl: 0,
        };
        assert_eq!(
            serde_json::to_value(&d).unwrap(),
            json!({
                "layer": "Convolution2D", "kernel_height": 3, "kernel_width": 5,
                "kernel_num": 16, "stride_hz": 2, "stride_vl": 1,
                "padding_hz": 0, "padding_vl": 0
            })
        );
    }

    #[test]
    fn test_layer_key_is_first() {
        let s = serde_json::to_string(&TargetDescriptor::Dense2D { units: 10 }).unwrap();
        assert_eq!(s, r#"{"layer":"Dense2D","units":10}"#);
    }

    #[test]
    fn test_tag_only_wire_format() {
        assert_eq!(
            serde_json::to_value(TargetDescriptor::HardSigmoid).unwrap(),
            json!({"layer": "HardSigmoid"})
        );
        assert_eq!(
            serde_json::to_value(TargetDescriptor::GlobalAveragePooling2D).unwrap(),
            json!({"layer": "GlobalAveragePooling2D"})
        );
    }

    #[test]
    fn test_cropping_keys_are_camel_case() {
        let d = TargetDescriptor::Cropping2D {
            top_trim: 1,
            bottom_trim: 2,
            left_trim: 3,
            right_trim: 4,
        };
        assert_eq!(
            serde_json::to_value(&d).unwrap(),
            json!({"layer": "Cropping2D", "topTrim": 1, "bottomTrim": 2, "leftTrim": 3, "rightTrim": 4})
        );
        let d = TargetDescriptor::Cropping1D {
            trim_begin: 2,
            trim_end: 0,
        };
        assert_eq!(
            serde_json::to_value(&d).unwrap(),
            json!({"layer": "Cropping1D", "trimBegin": 2, "trimEnd": 0})
        );
    }

    #[test]
    fn test_name_matches_tag() {
        let samples = [
            TargetDescriptor::Input2D { height: 1, width: 1, channel: 3, batch: 1 },
            TargetDescriptor::Reshape { height: 2, width: -1, channel: 4 },
            TargetDescriptor::Permute { dim1: 2, dim2: 1, dim3: 3 },
            TargetDescriptor::RepeatVector { num: 3 },
            TargetDescriptor::MaxPooling1D { kernel_size: 2, stride: 2, padding: 0 },
            TargetDescriptor::TanH,
        ];
        for d in samples {
            let value = serde_json::to_value(&d).unwrap();
            assert_eq!(value["layer"], d.name());
        }
    }

    #[test]
    fn test_owns_weights() {
        assert!(TargetDescriptor::Bias2D { units: 4 }.owns_weights());
        assert!(TargetDescriptor::Dense2D { units: 4 }.owns_weights());
        assert!(!TargetDescriptor::Flatten.owns_weights());
        assert!(!TargetDescriptor::ReLu.owns_weights());
        assert!(TargetDescriptor::ReLu.is_activation());
        assert!(!TargetDescriptor::Flatten.is_activation());
    }

    #[test]
    fn test_deserialize() {
        let d: TargetDescriptor =
            serde_json::from_str(r#"{"layer":"RepeatVector","num":7}"#).unwrap();
        assert_eq!(d, TargetDescriptor::RepeatVector { num: 7 });
        let d: TargetDescriptor = serde_json::from_str(r#"{"layer":"SoftSign"}"#).unwrap();
        assert_eq!(d, TargetDescriptor::SoftSign);
    }
}
