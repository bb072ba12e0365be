macro_rules! names {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:expr,)+ }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        #[allow(missing_docs)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Parses a name from a string.
            pub fn from_str(text: &str) -> Option<Self> {
                match text {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Returns the name as a string.
            pub fn to_str(&self) -> &'static str {
                match *self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}", self.to_str())
            }
        }
    };
}

names!(
    /// A list of known SVG elements.
    EId {
        A => "a",
        Circle => "circle",
        ClipPath => "clipPath",
        Defs => "defs",
        Desc => "desc",
        Ellipse => "ellipse",
        G => "g",
        Image => "image",
        Line => "line",
        LinearGradient => "linearGradient",
        Marker => "marker",
        Mask => "mask",
        Metadata => "metadata",
        Path => "path",
        Pattern => "pattern",
        Polygon => "polygon",
        Polyline => "polyline",
        RadialGradient => "radialGradient",
        Rect => "rect",
        Script => "script",
        Stop => "stop",
        Style => "style",
        Svg => "svg",
        Switch => "switch",
        Symbol => "symbol",
        Text => "text",
        TextPath => "textPath",
        Title => "title",
        Tspan => "tspan",
        Use => "use",
    }
);

names!(
    /// A list of SVG attributes that can be accessed without a namespace.
    AId {
        Cx => "cx",
        Cy => "cy",
        D => "d",
        Height => "height",
        Id => "id",
        Points => "points",
        R => "r",
        Rx => "rx",
        Ry => "ry",
        Style => "style",
        Transform => "transform",
        Width => "width",
        X => "x",
        X1 => "x1",
        X2 => "x2",
        Y => "y",
        Y1 => "y1",
        Y2 => "y2",
    }
);

impl EId {
    /// Checks that element's text children must be preserved as is.
    pub fn is_text_content(&self) -> bool {
        matches!(
            self,
            EId::Text | EId::Tspan | EId::TextPath | EId::Title | EId::Desc | EId::Style | EId::Script
        )
    }
}
