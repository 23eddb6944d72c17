/// Implements [`Wither`](crate::Wither) for concrete types, or for boxed
/// trait objects.
///
/// For concrete types, the type must implement [`Describe`](crate::Describe):
///
/// ```
/// # use std::sync::LazyLock;
/// # use wither_core::{Describe, Shape, Wither, impl_wither};
/// #[derive(Debug, Clone, Default)]
/// struct Counter {
///     count: u32,
/// }
///
/// impl Describe for Counter {
///     fn shape() -> &'static Shape {
///         static SHAPE: LazyLock<Shape> = LazyLock::new(|| {
///             Shape::builder::<Counter>("Counter")
///                 .default_constructor()
///                 .property_mut("count", |c: &Counter| c.count, |c, v| c.count = v)
///                 .build()
///         });
///         &SHAPE
///     }
/// }
///
/// impl_wither!(Counter);
///
/// assert_eq!(Counter::default().shape_of().type_identifier, "Counter");
/// ```
///
/// For trait objects, the trait must have [`Instance`](crate::Instance) as a
/// supertrait, and every concrete type that may hide behind the box must be
/// listed, so that a freshly built value can be boxed back up:
///
/// ```ignore
/// trait Animal: Instance {}
///
/// impl_wither!(dyn Animal => Dog, Cat);
/// ```
#[macro_export]
macro_rules! impl_wither {
    (dyn $iface:path => $($concrete:ty),+ $(,)?) => {
        impl $crate::Wither for ::std::boxed::Box<dyn $iface> {
            fn shape_of(&self) -> &'static $crate::Shape {
                $crate::Instance::instance_shape(&**self)
            }

            fn as_instance(&self) -> &dyn ::core::any::Any {
                $crate::Instance::as_any(&**self)
            }

            fn rewrap(
                &self,
                built: ::std::boxed::Box<dyn ::core::any::Any + ::core::marker::Send + ::core::marker::Sync>,
            ) -> ::core::option::Option<Self> {
                $(
                    let built = match built.downcast::<$concrete>() {
                        ::core::result::Result::Ok(concrete) => {
                            return ::core::option::Option::Some(concrete as ::std::boxed::Box<dyn $iface>);
                        }
                        ::core::result::Result::Err(other) => other,
                    };
                )+
                ::core::mem::drop(built);
                ::core::option::Option::None
            }
        }
    };

    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Wither for $ty {
                fn shape_of(&self) -> &'static $crate::Shape {
                    <$ty as $crate::Describe>::shape()
                }

                fn as_instance(&self) -> &dyn ::core::any::Any {
                    self
                }

                fn rewrap(
                    &self,
                    built: ::std::boxed::Box<dyn ::core::any::Any + ::core::marker::Send + ::core::marker::Sync>,
                ) -> ::core::option::Option<Self> {
                    built.downcast::<$ty>().ok().map(|built| *built)
                }
            }
        )+
    };
}
