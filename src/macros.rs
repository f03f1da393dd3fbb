//! Accessor generators for element types

/// Typed `x` / `is_set_x` / `set_x` / `unset_x` accessors over record fields
macro_rules! value_accessors {
    ($($field:ident: $ty:ty => $get:ident, $is_set:ident, $set:ident, $unset:ident;)*) => {
        $(
            #[doc = concat!("`", stringify!($field), "` value; the sentinel while unset")]
            pub fn $get(&self) -> $ty {
                self.$field.get()
            }

            #[doc = concat!("Whether `", stringify!($field), "` is set")]
            pub fn $is_set(&self) -> bool {
                self.$field.is_set()
            }

            #[doc = concat!("Set `", stringify!($field), "`")]
            pub fn $set(&mut self, value: $ty) -> $crate::error::OperationResult {
                self.$field.set(value)
            }

            #[doc = concat!("Unset `", stringify!($field), "`")]
            pub fn $unset(&mut self) -> $crate::error::OperationResult {
                self.$field.unset()
            }
        )*
    };
}

/// Same as `value_accessors` for text records
macro_rules! text_accessors {
    ($($field:ident => $get:ident, $is_set:ident, $set:ident, $unset:ident;)*) => {
        $(
            #[doc = concat!("`", stringify!($field), "` text; empty while unset")]
            pub fn $get(&self) -> &str {
                self.$field.get()
            }

            #[doc = concat!("Whether `", stringify!($field), "` is set")]
            pub fn $is_set(&self) -> bool {
                self.$field.is_set()
            }

            #[doc = concat!("Set `", stringify!($field), "`; empty text unsets it")]
            pub fn $set(&mut self, value: &str) -> $crate::error::OperationResult {
                self.$field.set(value)
            }

            #[doc = concat!("Unset `", stringify!($field), "`")]
            pub fn $unset(&mut self) -> $crate::error::OperationResult {
                self.$field.unset()
            }
        )*
    };
}

/// `x` / `x_mut` / `create_x` / `set_x` / `unset_x` over a [`Singleton`](crate::binding::Singleton) field
macro_rules! singleton_accessors {
    ($($field:ident: $ty:ty => $get:ident, $get_mut:ident, $create:ident, $set:ident, $unset:ident;)*) => {
        $(
            #[doc = concat!("The `", stringify!($field), "` child, if present")]
            pub fn $get(&self) -> Option<&$ty> {
                self.$field.get()
            }

            #[doc = concat!("The `", stringify!($field), "` child, mutably")]
            pub fn $get_mut(&mut self) -> Option<&mut $ty> {
                self.$field.get_mut()
            }

            #[doc = concat!("Replace `", stringify!($field), "` with a default child and return it")]
            pub fn $create(&mut self) -> &mut $ty {
                self.$field.create()
            }

            #[doc = concat!("Set `", stringify!($field), "` to a copy of `child`")]
            pub fn $set(&mut self, child: &$ty) -> $crate::error::OperationResult {
                self.$field.set(child)
            }

            #[doc = concat!("Remove `", stringify!($field), "`")]
            pub fn $unset(&mut self) -> $crate::error::OperationResult {
                self.$field.unset()
            }
        )*
    };
}

/// `AttributeBindable::assign` / `value_of` bodies for an element's own records
///
/// Names not listed fall through to the shared core attributes.
macro_rules! bind_records {
    (
        values { $($vname:literal => $vfield:ident: $variant:ident),* $(,)? }
        texts { $($tname:literal => $tfield:ident),* $(,)? }
    ) => {
        fn assign(
            &mut self,
            name: &str,
            value: $crate::binding::TypedValue,
        ) -> $crate::error::OperationResult {
            match name {
                $($vname => match value {
                    $crate::binding::TypedValue::$variant(v) => self.$vfield.set(v),
                    _ => Err($crate::error::OperationError::InvalidAttributeValue),
                },)*
                $($tname => match value {
                    $crate::binding::TypedValue::Text(ref text) => self.$tfield.set(text),
                    _ => Err($crate::error::OperationError::InvalidAttributeValue),
                },)*
                _ => self.core.assign(name, value),
            }
        }

        fn value_of(&self, name: &str) -> Option<$crate::binding::TypedValue> {
            match name {
                $($vname => self.$vfield.as_option().map($crate::binding::TypedValue::$variant),)*
                $($tname => self
                    .$tfield
                    .as_option()
                    .map(|text| $crate::binding::TypedValue::Text(text.to_string())),)*
                _ => self.core.value_of(name),
            }
        }
    };
}
