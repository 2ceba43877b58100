//! Macros to reduce boilerplate in element implementations
//!
//! This module provides macros that generate the repetitive parts of the
//! `Element` trait and of the layer property accessors shared by every
//! layer type.

/// Macro to implement the dynamic casting methods of `Element`
///
/// Usage:
/// ```rust,ignore
/// impl Element for MyElement {
///     crate::impl_element_any!();
///     // ...
/// }
/// ```
#[macro_export]
macro_rules! impl_element_any {
    () => {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    };
}

/// Macro to implement `Element::layer` for types storing a `Layer` in a field
#[macro_export]
macro_rules! impl_element_layer {
    ($properties_field:ident) => {
        fn layer(&self) -> Option<&$crate::layers::base::Layer> {
            Some(&self.$properties_field)
        }
    };
}

/// Macro to generate the inherent layer accessors and builder setters
///
/// This generates:
/// - properties(), properties_mut()
/// - name(), overlay(), control() builder setters
#[macro_export]
macro_rules! impl_layer_builder {
    ($properties_field:ident) => {
        /// Layer-control properties
        pub fn properties(&self) -> &$crate::layers::base::Layer {
            &self.$properties_field
        }

        pub fn properties_mut(&mut self) -> &mut $crate::layers::base::Layer {
            &mut self.$properties_field
        }

        /// Name shown in layer controls
        pub fn name(mut self, name: impl Into<String>) -> Self {
            self.$properties_field.set_name(name);
            self
        }

        /// Toggle as an overlay (checkbox) instead of a base layer (radio button)
        pub fn overlay(mut self, overlay: bool) -> Self {
            self.$properties_field.set_overlay(overlay);
            self
        }

        /// Whether layer controls list this layer
        pub fn control(mut self, control: bool) -> Self {
            self.$properties_field.set_control(control);
            self
        }
    };
}
