// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Layer translation: one source layer in, a [`LayerPlan`] out.
//!
//! A plan carries both the target descriptors and the roles of the source
//! tensors the layer owns, so the descriptor sequence and the weight cursor
//! are driven from a single decision per layer.
//!
//! Descriptor order within a plan is fixed: main op, then `Bias2D` when the
//! layer uses a bias, then the activation unless it is `linear`.

use crate::activation::activation_descriptor;
use crate::reshape::WeightRole;
use crate::{ConvertError, TargetDescriptor};
use model_ir::{Cropping, LayerConfig, SourceLayer};

/// The closed set of source layer kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    InputLayer,
    Conv1D,
    Conv2D,
    Cropping1D,
    Cropping2D,
    Activation,
    Dense,
    AveragePooling1D,
    AveragePooling2D,
    MaxPooling1D,
    MaxPooling2D,
    GlobalMaxPooling1D,
    GlobalMaxPooling2D,
    GlobalAveragePooling1D,
    GlobalAveragePooling2D,
    Flatten,
    Reshape,
    Permute,
    RepeatVector,
}

/// `class_name` → kind. Anything absent here is unsupported.
const LAYER_KINDS: &[(&str, LayerKind)] = &[
    ("InputLayer", LayerKind::InputLayer),
    ("Conv1D", LayerKind::Conv1D),
    ("Conv2D", LayerKind::Conv2D),
    ("Cropping1D", LayerKind::Cropping1D),
    ("Cropping2D", LayerKind::Cropping2D),
    ("Activation", LayerKind::Activation),
    ("Dense", LayerKind::Dense),
    ("AveragePooling1D", LayerKind::AveragePooling1D),
    ("AveragePooling2D", LayerKind::AveragePooling2D),
    ("MaxPooling1D", LayerKind::MaxPooling1D),
    ("MaxPooling2D", LayerKind::MaxPooling2D),
    ("GlobalMaxPooling1D", LayerKind::GlobalMaxPooling1D),
    ("GlobalMaxPooling2D", LayerKind::GlobalMaxPooling2D),
    ("GlobalAveragePooling1D", LayerKind::GlobalAveragePooling1D),
    ("GlobalAveragePooling2D", LayerKind::GlobalAveragePooling2D),
    ("Flatten", LayerKind::Flatten),
    ("Reshape", LayerKind::Reshape),
    ("Permute", LayerKind::Permute),
    ("RepeatVector", LayerKind::RepeatVector),
];

impl LayerKind {
    /// Looks up a kind by its exact `class_name`.
    pub fn from_class_name(name: &str) -> Option<Self> {
        LAYER_KINDS
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, kind)| *kind)
    }

    /// Returns the `class_name` this kind is matched from.
    pub fn class_name(self) -> &'static str {
        LAYER_KINDS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(name, _)| *name)
            .unwrap_or("?")
    }

    /// Iterates over every supported kind.
    pub fn all() -> impl Iterator<Item = LayerKind> {
        LAYER_KINDS.iter().map(|(_, kind)| *kind)
    }
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.class_name())
    }
}

/// What one source layer becomes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerPlan {
    /// Target descriptors, in emission order.
    pub descriptors: Vec<TargetDescriptor>,
    /// Roles of the source tensors this layer consumes, in cursor order.
    pub weights: Vec<WeightRole>,
}

impl LayerPlan {
    /// Number of source tensors the layer consumes.
    pub fn weight_count(&self) -> usize {
        self.weights.len()
    }

    fn emit(&mut self, descriptor: TargetDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// Main op owning a kernel tensor.
    fn emit_weighted(&mut self, descriptor: TargetDescriptor, role: WeightRole) {
        self.descriptors.push(descriptor);
        self.weights.push(role);
    }

    fn emit_bias(&mut self, use_bias: bool, units: usize) {
        if use_bias {
            self.emit_weighted(TargetDescriptor::Bias2D { units }, WeightRole::Bias { units });
        }
    }

    fn emit_activation(&mut self, name: &str, layer: &str) -> Result<(), ConvertError> {
        if let Some(d) = activation_descriptor(name, layer)? {
            self.emit(d);
        }
        Ok(())
    }
}

/// Translates the source layer at position `index` into a [`LayerPlan`].
pub fn translate_layer(layer: &SourceLayer, index: usize) -> Result<LayerPlan, ConvertError> {
    let name = layer.display_name(index);
    let kind = LayerKind::from_class_name(&layer.class_name).ok_or_else(|| {
        ConvertError::UnsupportedLayerKind {
            kind: layer.class_name.clone(),
            layer: name.clone(),
        }
    })?;

    let cfg = Fields {
        config: &layer.config,
        layer: &name,
    };
    let mut plan = LayerPlan::default();

    match kind {
        LayerKind::InputLayer => {}

        LayerKind::Conv1D => {
            let filters = cfg.require(cfg.config.filters, "filters")?;
            cfg.warn_on_padding();
            plan.emit_weighted(
                TargetDescriptor::Convolution1D {
                    kernel_size: cfg.axis(&cfg.config.kernel_size, "kernel_size", 0)?,
                    kernel_num: filters,
                    stride: cfg.axis(&cfg.config.strides, "strides", 0)?,
                    padding: 0,
                },
                WeightRole::Conv1DKernel { filters },
            );
            plan.emit_bias(cfg.require(cfg.config.use_bias, "use_bias")?, filters);
            plan.emit_activation(cfg.activation()?, &name)?;
        }

        LayerKind::Conv2D => {
            let filters = cfg.require(cfg.config.filters, "filters")?;
            cfg.warn_on_padding();
            plan.emit_weighted(
                TargetDescriptor::Convolution2D {
                    kernel_height: cfg.axis(&cfg.config.kernel_size, "kernel_size", 0)?,
                    kernel_width: cfg.axis(&cfg.config.kernel_size, "kernel_size", 1)?,
                    kernel_num: filters,
                    stride_hz: cfg.axis(&cfg.config.strides, "strides", 1)?,
                    stride_vl: cfg.axis(&cfg.config.strides, "strides", 0)?,
                    padding_hz: 0,
                    padding_vl: 0,
                },
                WeightRole::Conv2DKernel { filters },
            );
            plan.emit_bias(cfg.require(cfg.config.use_bias, "use_bias")?, filters);
            plan.emit_activation(cfg.activation()?, &name)?;
        }

        LayerKind::Cropping1D => match cfg.config.cropping {
            Some(Cropping::Pair([begin, end])) => plan.emit(TargetDescriptor::Cropping1D {
                trim_begin: begin,
                trim_end: end,
            }),
            Some(Cropping::Grid(_)) => return Err(cfg.invalid("Cropping1D expects a (begin, end) pair")),
            None => return Err(cfg.missing("cropping")),
        },

        LayerKind::Cropping2D => match cfg.config.cropping {
            Some(Cropping::Grid([[top, bottom], [left, right]])) => {
                plan.emit(TargetDescriptor::Cropping2D {
                    top_trim: top,
                    bottom_trim: bottom,
                    left_trim: left,
                    right_trim: right,
                })
            }
            Some(Cropping::Pair(_)) => {
                return Err(cfg.invalid("Cropping2D expects ((top, bottom), (left, right))"))
            }
            None => return Err(cfg.missing("cropping")),
        },

        LayerKind::Activation => {
            plan.emit_activation(cfg.activation()?, &name)?;
        }

        LayerKind::Dense => {
            let units = cfg.require(cfg.config.units, "units")?;
            plan.emit_weighted(
                TargetDescriptor::Dense2D { units },
                WeightRole::DenseKernel { units },
            );
            plan.emit_bias(cfg.require(cfg.config.use_bias, "use_bias")?, units);
            plan.emit_activation(cfg.activation()?, &name)?;
        }

        LayerKind::AveragePooling1D | LayerKind::MaxPooling1D => {
            cfg.warn_on_padding();
            let kernel_size = cfg.axis(&cfg.config.pool_size, "pool_size", 0)?;
            let stride = cfg.pool_stride(0)?;
            plan.emit(if kind == LayerKind::AveragePooling1D {
                TargetDescriptor::AvgPooling1D {
                    kernel_size,
                    stride,
                    padding: 0,
                }
            } else {
                TargetDescriptor::MaxPooling1D {
                    kernel_size,
                    stride,
                    padding: 0,
                }
            });
        }

        LayerKind::AveragePooling2D | LayerKind::MaxPooling2D => {
            cfg.warn_on_padding();
            let kernel_height = cfg.axis(&cfg.config.pool_size, "pool_size", 0)?;
            let kernel_width = cfg.axis(&cfg.config.pool_size, "pool_size", 1)?;
            let stride_hz = cfg.pool_stride(1)?;
            let stride_vl = cfg.pool_stride(0)?;
            plan.emit(if kind == LayerKind::AveragePooling2D {
                TargetDescriptor::AvgPooling2D {
                    kernel_height,
                    kernel_width,
                    stride_hz,
                    stride_vl,
                    padding_hz: 0,
                    padding_vl: 0,
                }
            } else {
                TargetDescriptor::MaxPooling2D {
                    kernel_height,
                    kernel_width,
                    stride_hz,
                    stride_vl,
                    padding_hz: 0,
                    padding_vl: 0,
                }
            });
        }

        LayerKind::GlobalMaxPooling1D => plan.emit(TargetDescriptor::GlobalMaxPooling1D),
        LayerKind::GlobalMaxPooling2D => plan.emit(TargetDescriptor::GlobalMaxPooling2D),
        LayerKind::GlobalAveragePooling1D => plan.emit(TargetDescriptor::GlobalAveragePooling1D),
        LayerKind::GlobalAveragePooling2D => plan.emit(TargetDescriptor::GlobalAveragePooling2D),
        LayerKind::Flatten => plan.emit(TargetDescriptor::Flatten),

        LayerKind::Reshape => {
            let target = cfg.config.target_shape.as_deref().ok_or_else(|| cfg.missing("target_shape"))?;
            let [height, width, channel] = target else {
                return Err(cfg.invalid(format!(
                    "Reshape supports 3-element target shapes only, got {target:?}"
                )));
            };
            plan.emit(TargetDescriptor::Reshape {
                height: *height,
                width: *width,
                channel: *channel,
            });
        }

        LayerKind::Permute => {
            let dims = cfg.config.dims.as_deref().ok_or_else(|| cfg.missing("dims"))?;
            let [dim1, dim2, dim3] = dims else {
                return Err(cfg.invalid(format!("Permute requires exactly 3 dims, got {dims:?}")));
            };
            plan.emit(TargetDescriptor::Permute {
                dim1: *dim1,
                dim2: *dim2,
                dim3: *dim3,
            });
        }

        LayerKind::RepeatVector => plan.emit(TargetDescriptor::RepeatVector {
            num: cfg.require(cfg.config.n, "n")?,
        }),
    }

    Ok(plan)
}

/// Field access on one layer's config with errors attributed to that layer.
struct Fields<'a> {
    config: &'a LayerConfig,
    layer: &'a str,
}

impl Fields<'_> {
    fn missing(&self, field: &'static str) -> ConvertError {
        ConvertError::MissingField {
            layer: self.layer.to_string(),
            field,
        }
    }

    fn invalid(&self, detail: impl Into<String>) -> ConvertError {
        ConvertError::InvalidParameter {
            layer: self.layer.to_string(),
            detail: detail.into(),
        }
    }

    fn require<T>(&self, value: Option<T>, field: &'static str) -> Result<T, ConvertError> {
        value.ok_or_else(|| self.missing(field))
    }

    /// Entry `i` of a list-valued key.
    fn axis(
        &self,
        values: &Option<Vec<usize>>,
        field: &'static str,
        i: usize,
    ) -> Result<usize, ConvertError> {
        let values = values.as_deref().ok_or_else(|| self.missing(field))?;
        values.get(i).copied().ok_or_else(|| {
            self.invalid(format!("'{field}' has {} entries, need at least {}", values.len(), i + 1))
        })
    }

    /// Pooling stride along axis `i`; a null `strides` means "same as pool_size".
    fn pool_stride(&self, i: usize) -> Result<usize, ConvertError> {
        match self.config.strides {
            Some(_) => self.axis(&self.config.strides, "strides", i),
            None => self.axis(&self.config.pool_size, "pool_size", i),
        }
    }

    fn activation(&self) -> Result<&str, ConvertError> {
        self.config
            .activation
            .as_deref()
            .ok_or_else(|| self.missing("activation"))
    }

    fn warn_on_padding(&self) {
        if let Some(padding) = self.config.padding.as_deref() {
            if padding != "valid" {
                tracing::warn!(
                    "layer '{}' uses padding '{padding}'; emitting padding 0",
                    self.layer
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn layer(class_name: &str, config: serde_json::Value) -> SourceLayer {
        serde_json::from_value(json!({ "class_name": class_name, "config": config })).unwrap()
    }

    fn names(plan: &LayerPlan) -> Vec<&'static str> {
        plan.descriptors.iter().map(|d| d.name()).collect()
    }

    #[test]
    fn test_every_kind_round_trips_its_class_name() {
        for kind in LayerKind::all() {
            assert_eq!(LayerKind::from_class_name(kind.class_name()), Some(kind));
        }
        assert_eq!(LayerKind::all().count(), 19);
        assert_eq!(LayerKind::from_class_name("conv2d"), None);
    }

    #[test]
    fn test_conv2d_with_bias_and_relu() {
        let plan = translate_layer(
            &layer(
                "Conv2D",
                json!({"filters": 16, "kernel_size": [3, 5], "strides": [1, 2],
                       "use_bias": true, "activation": "relu"}),
            ),
            0,
        )
        .unwrap();
        assert_eq!(
            plan.descriptors,
            vec![
                TargetDescriptor::Convolution2D {
                    kernel_height: 3,
                    kernel_width: 5,
                    kernel_num: 16,
                    stride_hz: 2,
                    stride_vl: 1,
                    padding_hz: 0,
                    padding_vl: 0,
                },
                TargetDescriptor::Bias2D { units: 16 },
                TargetDescriptor::ReLu,
            ]
        );
        assert_eq!(
            plan.weights,
            vec![
                WeightRole::Conv2DKernel { filters: 16 },
                WeightRole::Bias { units: 16 }
            ]
        );
    }

    #[test]
    fn test_conv1d() {
        let plan = translate_layer(
            &layer(
                "Conv1D",
                json!({"filters": 4, "kernel_size": [3], "strides": [2],
                       "use_bias": false, "activation": "tanh"}),
            ),
            0,
        )
        .unwrap();
        assert_eq!(
            plan.descriptors[0],
            TargetDescriptor::Convolution1D {
                kernel_size: 3,
                kernel_num: 4,
                stride: 2,
                padding: 0
            }
        );
        assert_eq!(names(&plan), vec!["Convolution1D", "TanH"]);
        assert_eq!(plan.weight_count(), 1);
    }

    #[test]
    fn test_bias_presence_follows_use_bias() {
        for class in ["Conv1D", "Conv2D", "Dense"] {
            for use_bias in [false, true] {
                let plan = translate_layer(
                    &layer(
                        class,
                        json!({"filters": 2, "units": 2, "kernel_size": [1, 1], "strides": [1, 1],
                               "use_bias": use_bias, "activation": "sigmoid"}),
                    ),
                    0,
                )
                .unwrap();
                let bias_at = plan.descriptors.iter().position(|d| d.name() == "Bias2D");
                if use_bias {
                    assert_eq!(bias_at, Some(1), "{class}");
                    assert_eq!(plan.weight_count(), 2);
                } else {
                    assert_eq!(bias_at, None, "{class}");
                    assert_eq!(plan.weight_count(), 1);
                }
                assert_eq!(plan.descriptors.last().unwrap().name(), "Sigmoid");
            }
        }
    }

    #[test]
    fn test_dense_linear_emits_no_activation() {
        let plan = translate_layer(
            &layer("Dense", json!({"units": 10, "use_bias": true, "activation": "linear"})),
            0,
        )
        .unwrap();
        assert_eq!(names(&plan), vec!["Dense2D", "Bias2D"]);
    }

    #[test]
    fn test_one_activation_after_bias() {
        for name in crate::supported_activations() {
            let plan = translate_layer(
                &layer("Dense", json!({"units": 2, "use_bias": true, "activation": name})),
                0,
            )
            .unwrap();
            if name == crate::IDENTITY {
                assert_eq!(names(&plan), vec!["Dense2D", "Bias2D"]);
            } else {
                assert_eq!(plan.descriptors.len(), 3, "{name}");
                assert!(plan.descriptors[2].is_activation(), "{name}");
            }
        }
    }

    #[test]
    fn test_activation_layer() {
        let plan = translate_layer(&layer("Activation", json!({"activation": "softplus"})), 0).unwrap();
        assert_eq!(plan.descriptors, vec![TargetDescriptor::SoftPlus]);
        assert!(plan.weights.is_empty());

        let plan = translate_layer(&layer("Activation", json!({"activation": "linear"})), 0).unwrap();
        assert!(plan.descriptors.is_empty());
    }

    #[test]
    fn test_pooling_2d_axes() {
        let plan = translate_layer(
            &layer("MaxPooling2D", json!({"pool_size": [2, 3], "strides": [4, 5]})),
            0,
        )
        .unwrap();
        assert_eq!(
            plan.descriptors,
            vec![TargetDescriptor::MaxPooling2D {
                kernel_height: 2,
                kernel_width: 3,
                stride_hz: 5,
                stride_vl: 4,
                padding_hz: 0,
                padding_vl: 0,
            }]
        );
        let plan = translate_layer(
            &layer("AveragePooling2D", json!({"pool_size": [2, 2], "strides": [2, 2]})),
            0,
        )
        .unwrap();
        assert_eq!(names(&plan), vec!["AvgPooling2D"]);
    }

    #[test]
    fn test_pooling_1d_null_strides_default_to_pool_size() {
        let plan = translate_layer(
            &layer("AveragePooling1D", json!({"pool_size": [3], "strides": null})),
            0,
        )
        .unwrap();
        assert_eq!(
            plan.descriptors,
            vec![TargetDescriptor::AvgPooling1D {
                kernel_size: 3,
                stride: 3,
                padding: 0
            }]
        );
    }

    #[test]
    fn test_tag_only_kinds() {
        for (class, tag) in [
            ("GlobalMaxPooling1D", "GlobalMaxPooling1D"),
            ("GlobalMaxPooling2D", "GlobalMaxPooling2D"),
            ("GlobalAveragePooling1D", "GlobalAveragePooling1D"),
            ("GlobalAveragePooling2D", "GlobalAveragePooling2D"),
            ("Flatten", "Flatten"),
        ] {
            let plan = translate_layer(&layer(class, json!({})), 0).unwrap();
            assert_eq!(names(&plan), vec![tag]);
            assert!(plan.weights.is_empty());
        }
    }

    #[test]
    fn test_input_layer_emits_nothing() {
        let plan = translate_layer(
            &layer("InputLayer", json!({"batch_input_shape": [null, 4]})),
            0,
        )
        .unwrap();
        assert_eq!(plan, LayerPlan::default());
    }

    #[test]
    fn test_cropping() {
        let plan = translate_layer(&layer("Cropping1D", json!({"cropping": [1, 2]})), 0).unwrap();
        assert_eq!(
            plan.descriptors,
            vec![TargetDescriptor::Cropping1D {
                trim_begin: 1,
                trim_end: 2
            }]
        );
        let plan = translate_layer(
            &layer("Cropping2D", json!({"cropping": [[1, 2], [3, 4]]})),
            0,
        )
        .unwrap();
        assert_eq!(
            plan.descriptors,
            vec![TargetDescriptor::Cropping2D {
                top_trim: 1,
                bottom_trim: 2,
                left_trim: 3,
                right_trim: 4
            }]
        );
        assert!(matches!(
            translate_layer(&layer("Cropping2D", json!({"cropping": [1, 2]})), 0),
            Err(ConvertError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_reshape_permute_repeat() {
        let plan = translate_layer(&layer("Reshape", json!({"target_shape": [4, -1, 2]})), 0).unwrap();
        assert_eq!(
            plan.descriptors,
            vec![TargetDescriptor::Reshape {
                height: 4,
                width: -1,
                channel: 2
            }]
        );
        let plan = translate_layer(&layer("Permute", json!({"dims": [2, 1, 3]})), 0).unwrap();
        assert_eq!(
            plan.descriptors,
            vec![TargetDescriptor::Permute {
                dim1: 2,
                dim2: 1,
                dim3: 3
            }]
        );
        let plan = translate_layer(&layer("RepeatVector", json!({"n": 6})), 0).unwrap();
        assert_eq!(plan.descriptors, vec![TargetDescriptor::RepeatVector { num: 6 }]);
    }

    #[test]
    fn test_reshape_and_permute_arity() {
        assert!(matches!(
            translate_layer(&layer("Reshape", json!({"target_shape": [4, 2]})), 0),
            Err(ConvertError::InvalidParameter { .. })
        ));
        assert!(matches!(
            translate_layer(&layer("Permute", json!({"dims": [2, 1]})), 0),
            Err(ConvertError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_unsupported_kind() {
        let err = translate_layer(&layer("LSTM", json!({"name": "lstm_1", "units": 8})), 2).unwrap_err();
        match err {
            ConvertError::UnsupportedLayerKind { kind, layer } => {
                assert_eq!(kind, "LSTM");
                assert_eq!(layer, "lstm_1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unsupported_activation() {
        assert!(matches!(
            translate_layer(
                &layer("Dense", json!({"units": 1, "use_bias": false, "activation": "selu"})),
                0
            ),
            Err(ConvertError::UnsupportedActivation { .. })
        ));
    }

    #[test]
    fn test_missing_fields() {
        assert!(matches!(
            translate_layer(&layer("Dense", json!({"use_bias": true, "activation": "relu"})), 0),
            Err(ConvertError::MissingField { field: "units", .. })
        ));
        assert!(matches!(
            translate_layer(&layer("Dense", json!({"units": 3, "activation": "relu"})), 0),
            Err(ConvertError::MissingField { field: "use_bias", .. })
        ));
        assert!(matches!(
            translate_layer(
                &layer("Conv2D", json!({"filters": 3, "kernel_size": [3], "strides": [1, 1],
                                         "use_bias": true, "activation": "relu"})),
                0
            ),
            Err(ConvertError::InvalidParameter { .. })
        ));
    }
}
