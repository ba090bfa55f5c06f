use crate::conv::{Destination, StructDescriptor, ToValue};

/// Struct types with a static field layout usable as sources and destinations.
///
/// Implemented by [`record!`](crate::record).
pub trait Record: Destination + ToValue {
	/// Field layout shared by every instance.
	fn descriptor() -> &'static StructDescriptor;
}

/// Declare a struct together with its conversion layout.
///
/// Fields may carry flags after an `=`:
/// - `alias("key")`: extra key matched before the field name,
/// - `embedded`: fields of this struct are searched and flattened as if declared on the parent,
/// - `unexported`: the field is invisible to conversions.
///
/// ```
/// dynconv::record! {
/// 	#[derive(Debug, Default, Clone, PartialEq)]
/// 	pub struct Account {
/// 		pub name: String,
/// 		pub age: u32 = alias("years"),
/// 		secret: String = unexported,
/// 	}
/// }
///
/// let mut account = Account::default();
/// dynconv::conv::scan(r#"{"NAME": "ada", "years": 36, "secret": "x"}"#, &mut account).unwrap();
/// assert_eq!(account.name, "ada");
/// assert_eq!(account.age, 36);
/// assert!(account.secret.is_empty());
/// ```
#[macro_export]
macro_rules! record {
	(
		$(#[$meta:meta])*
		$vis:vis struct $name:ident {
			$(
				$(#[$field_meta:meta])*
				$field_vis:vis $field:ident : $ty:ty $(= $($flag:ident $(($arg:expr))?)+)?
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		$vis struct $name {
			$(
				$(#[$field_meta])*
				$field_vis $field: $ty,
			)*
		}

		impl $crate::conv::Record for $name {
			fn descriptor() -> &'static $crate::conv::StructDescriptor {
				static DESCRIPTOR: ::std::sync::OnceLock<$crate::conv::StructDescriptor> = ::std::sync::OnceLock::new();
				DESCRIPTOR.get_or_init(|| {
					$crate::conv::StructDescriptor::new::<$name>(
						stringify!($name),
						vec![$(
							$crate::conv::FieldDescriptor::new(stringify!($field), <$ty as $crate::conv::Destination>::shape_of)
								$($(.$flag($($arg)?))+)?
						),*],
					)
				})
			}
		}

		impl $crate::conv::Destination for $name {
			fn shape_of() -> $crate::conv::Shape {
				$crate::conv::Shape::Struct(<$name as $crate::conv::Record>::descriptor())
			}

			fn scan_from(&mut self, src: &$crate::conv::Value, cx: &$crate::conv::ScanContext<'_>) -> $crate::conv::Result<()> {
				$crate::conv::scan_record(self, <$name as $crate::conv::Record>::descriptor(), src, cx)
			}

			fn fields_mut(&mut self) -> ::std::option::Option<::std::vec::Vec<&mut dyn $crate::conv::Destination>> {
				::std::option::Option::Some(vec![$(&mut self.$field as &mut dyn $crate::conv::Destination),*])
			}
		}

		impl $crate::conv::ToValue for $name {
			fn to_value(&self) -> $crate::conv::Value {
				$crate::conv::Value::Struct($crate::conv::StructValue::from_record(
					<$name as $crate::conv::Record>::descriptor(),
					vec![$($crate::conv::ToValue::to_value(&self.$field)),*],
				))
			}
		}
	};
}
