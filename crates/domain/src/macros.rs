//! 値オブジェクト定義用の宣言型マクロ
//!
//! ID とテキスト系の値オブジェクトはすべてこのマクロで定義する。

/// UUID v7 の ID 型を定義する
///
/// `new()` / `from_uuid()` / `as_uuid()` と `Display`（UUID 文字列）を持つ。
///
/// ```rust
/// use planner_domain::trip::TripId;
///
/// let id = TripId::new();
/// assert_eq!(TripId::from_uuid(*id.as_uuid()), id);
/// assert_eq!(id.to_string(), id.as_uuid().to_string());
/// ```
macro_rules! define_uuid_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        $vis struct $Name(uuid::Uuid);

        impl $Name {
            /// 時刻順に並ぶ新しい ID（UUID v7）
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $Name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<$Name> for uuid::Uuid {
            fn from(id: $Name) -> Self {
                id.0
            }
        }
    };
}

/// 文字列の値オブジェクトを定義する
///
/// - `label` と `min_length` を指定すると、入力をそのまま（trim せずに）
///   `chars()` 単位で数え、最小文字数未満を `DomainError::Validation` にする
/// - 指定しない場合は任意の文字列（空文字を含む）を受け付け、`new` は失敗しない
/// - `redact_debug` を付けると `Debug` 出力をマスクし、`Display` を実装しない
///   （参加者名など、ログに平文で出したくない値向け）
///
/// ```rust
/// use planner_domain::trip::Destination;
///
/// assert!(Destination::new("Rio").is_err());
/// assert_eq!(Destination::new(" Rio ").unwrap().as_str(), " Rio ");
/// ```
macro_rules! define_validated_string {
    (@accessors $Name:ident) => {
        impl $Name {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }
    };
    (@display $(#[$meta:meta])* $vis:vis $Name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        $vis struct $Name(String);
    };
    (@infallible $Name:ident) => {
        impl $Name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }
        }

        impl From<String> for $Name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            label: $label:literal,
            min_length: $min:literal $(,)?
        }
    ) => {
        define_validated_string!(@display $(#[$meta])* $vis $Name);
        define_validated_string!(@accessors $Name);

        impl $Name {
            /// 受け付ける最小文字数
            pub const MIN_LENGTH: usize = $min;

            pub fn new(value: impl Into<String>) -> Result<Self, $crate::DomainError> {
                let value = value.into();
                if value.chars().count() < Self::MIN_LENGTH {
                    return Err($crate::DomainError::Validation(format!(
                        "{}は {} 文字以上である必要があります",
                        $label,
                        Self::MIN_LENGTH
                    )));
                }
                Ok(Self(value))
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident { redact_debug $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        $vis struct $Name(String);

        impl std::fmt::Debug for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($Name), "(\"[REDACTED]\")"))
            }
        }

        define_validated_string!(@accessors $Name);
        define_validated_string!(@infallible $Name);
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {}
    ) => {
        define_validated_string!(@display $(#[$meta])* $vis $Name);
        define_validated_string!(@accessors $Name);
        define_validated_string!(@infallible $Name);
    };
}
