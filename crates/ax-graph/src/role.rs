use std::fmt;

/// Coarse grouping used by traversal and filtering decisions. Assigned from
/// the role exactly once, when the node is built.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum NodeCategory {
    Structural,
    Text,
    Interaction,
    List,
    Table,
    Tree,
    Image,
    Code,
    Other,
}

/// Accessibility roles this pipeline knows how to classify. Raw role strings
/// are matched case-insensitively; anything else stays a raw string on the
/// node (see [`Role::Unknown`]).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum NodeRole {
    Alert,
    AlertDialog,
    Application,
    Article,
    Banner,
    Blockquote,
    Button,
    Canvas,
    Caption,
    Cell,
    Checkbox,
    Code,
    ColumnHeader,
    Combobox,
    Complementary,
    ContentInfo,
    Definition,
    Deletion,
    DescriptionList,
    DescriptionListDetail,
    DescriptionListTerm,
    Dialog,
    Directory,
    Document,
    Emphasis,
    Feed,
    Figure,
    Form,
    Generic,
    Grid,
    GridCell,
    Group,
    Heading,
    Iframe,
    IframePresentational,
    Image,
    Img,
    Insertion,
    LabelText,
    Legend,
    LineBreak,
    Link,
    List,
    ListBox,
    ListItem,
    ListMarker,
    Log,
    Main,
    Marquee,
    Math,
    Menu,
    MenuBar,
    MenuItem,
    MenuItemCheckbox,
    MenuItemRadio,
    Meter,
    Navigation,
    None,
    Note,
    Option,
    Paragraph,
    Presentation,
    ProgressBar,
    Radio,
    RadioGroup,
    Region,
    RootWebArea,
    Row,
    RowGroup,
    RowHeader,
    ScrollBar,
    Search,
    SearchBox,
    Section,
    Separator,
    Slider,
    SpinButton,
    StaticText,
    Status,
    Strong,
    Subscript,
    Superscript,
    Switch,
    Tab,
    TabList,
    TabPanel,
    Table,
    Term,
    Text,
    Textbox,
    Time,
    Timer,
    ToggleButton,
    Toolbar,
    Tooltip,
    Tree,
    TreeGrid,
    TreeItem,
    WebArea,
}

impl NodeRole {
    /// Parses a raw role string (case-insensitive). Returns `None` when the
    /// role is not in the known table.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let role = match raw.to_ascii_lowercase().as_str() {
            "alert" => Self::Alert,
            "alertdialog" => Self::AlertDialog,
            "application" => Self::Application,
            "article" => Self::Article,
            "banner" => Self::Banner,
            "blockquote" => Self::Blockquote,
            "button" => Self::Button,
            "canvas" => Self::Canvas,
            "caption" => Self::Caption,
            "cell" => Self::Cell,
            "checkbox" => Self::Checkbox,
            "code" => Self::Code,
            "columnheader" => Self::ColumnHeader,
            "combobox" => Self::Combobox,
            "complementary" => Self::Complementary,
            "contentinfo" => Self::ContentInfo,
            "definition" => Self::Definition,
            "deletion" => Self::Deletion,
            "descriptionlist" => Self::DescriptionList,
            "descriptionlistdetail" => Self::DescriptionListDetail,
            "descriptionlistterm" => Self::DescriptionListTerm,
            "dialog" => Self::Dialog,
            "directory" => Self::Directory,
            "document" => Self::Document,
            "emphasis" => Self::Emphasis,
            "feed" => Self::Feed,
            "figure" => Self::Figure,
            "form" => Self::Form,
            "generic" => Self::Generic,
            "grid" => Self::Grid,
            "gridcell" => Self::GridCell,
            "group" => Self::Group,
            "heading" => Self::Heading,
            "iframe" => Self::Iframe,
            "iframepresentational" => Self::IframePresentational,
            "image" => Self::Image,
            "img" => Self::Img,
            "insertion" => Self::Insertion,
            "labeltext" => Self::LabelText,
            "legend" => Self::Legend,
            "linebreak" => Self::LineBreak,
            "link" => Self::Link,
            "list" => Self::List,
            "listbox" => Self::ListBox,
            "listitem" => Self::ListItem,
            "listmarker" => Self::ListMarker,
            "log" => Self::Log,
            "main" => Self::Main,
            "marquee" => Self::Marquee,
            "math" => Self::Math,
            "menu" => Self::Menu,
            "menubar" => Self::MenuBar,
            "menuitem" => Self::MenuItem,
            "menuitemcheckbox" => Self::MenuItemCheckbox,
            "menuitemradio" => Self::MenuItemRadio,
            "meter" => Self::Meter,
            "navigation" => Self::Navigation,
            "none" => Self::None,
            "note" => Self::Note,
            "option" => Self::Option,
            "paragraph" => Self::Paragraph,
            "presentation" => Self::Presentation,
            "progressbar" => Self::ProgressBar,
            "radio" => Self::Radio,
            "radiogroup" => Self::RadioGroup,
            "region" => Self::Region,
            "rootwebarea" => Self::RootWebArea,
            "row" => Self::Row,
            "rowgroup" => Self::RowGroup,
            "rowheader" => Self::RowHeader,
            "scrollbar" => Self::ScrollBar,
            "search" => Self::Search,
            "searchbox" => Self::SearchBox,
            "section" => Self::Section,
            "separator" => Self::Separator,
            "slider" => Self::Slider,
            "spinbutton" => Self::SpinButton,
            "statictext" => Self::StaticText,
            "status" => Self::Status,
            "strong" => Self::Strong,
            "subscript" => Self::Subscript,
            "superscript" => Self::Superscript,
            "switch" => Self::Switch,
            "tab" => Self::Tab,
            "tablist" => Self::TabList,
            "tabpanel" => Self::TabPanel,
            "table" => Self::Table,
            "term" => Self::Term,
            "text" => Self::Text,
            "textbox" => Self::Textbox,
            "time" => Self::Time,
            "timer" => Self::Timer,
            "togglebutton" => Self::ToggleButton,
            "toolbar" => Self::Toolbar,
            "tooltip" => Self::Tooltip,
            "tree" => Self::Tree,
            "treegrid" => Self::TreeGrid,
            "treeitem" => Self::TreeItem,
            "webarea" => Self::WebArea,
            _ => return None,
        };
        Some(role)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::AlertDialog => "alertdialog",
            Self::Application => "application",
            Self::Article => "article",
            Self::Banner => "banner",
            Self::Blockquote => "blockquote",
            Self::Button => "button",
            Self::Canvas => "canvas",
            Self::Caption => "caption",
            Self::Cell => "cell",
            Self::Checkbox => "checkbox",
            Self::Code => "code",
            Self::ColumnHeader => "columnheader",
            Self::Combobox => "combobox",
            Self::Complementary => "complementary",
            Self::ContentInfo => "contentinfo",
            Self::Definition => "definition",
            Self::Deletion => "deletion",
            Self::DescriptionList => "descriptionlist",
            Self::DescriptionListDetail => "descriptionlistdetail",
            Self::DescriptionListTerm => "descriptionlistterm",
            Self::Dialog => "dialog",
            Self::Directory => "directory",
            Self::Document => "document",
            Self::Emphasis => "emphasis",
            Self::Feed => "feed",
            Self::Figure => "figure",
            Self::Form => "form",
            Self::Generic => "generic",
            Self::Grid => "grid",
            Self::GridCell => "gridcell",
            Self::Group => "group",
            Self::Heading => "heading",
            Self::Iframe => "iframe",
            Self::IframePresentational => "iframepresentational",
            Self::Image => "image",
            Self::Img => "img",
            Self::Insertion => "insertion",
            Self::LabelText => "labeltext",
            Self::Legend => "legend",
            Self::LineBreak => "linebreak",
            Self::Link => "link",
            Self::List => "list",
            Self::ListBox => "listbox",
            Self::ListItem => "listitem",
            Self::ListMarker => "listmarker",
            Self::Log => "log",
            Self::Main => "main",
            Self::Marquee => "marquee",
            Self::Math => "math",
            Self::Menu => "menu",
            Self::MenuBar => "menubar",
            Self::MenuItem => "menuitem",
            Self::MenuItemCheckbox => "menuitemcheckbox",
            Self::MenuItemRadio => "menuitemradio",
            Self::Meter => "meter",
            Self::Navigation => "navigation",
            Self::None => "none",
            Self::Note => "note",
            Self::Option => "option",
            Self::Paragraph => "paragraph",
            Self::Presentation => "presentation",
            Self::ProgressBar => "progressbar",
            Self::Radio => "radio",
            Self::RadioGroup => "radiogroup",
            Self::Region => "region",
            Self::RootWebArea => "rootwebarea",
            Self::Row => "row",
            Self::RowGroup => "rowgroup",
            Self::RowHeader => "rowheader",
            Self::ScrollBar => "scrollbar",
            Self::Search => "search",
            Self::SearchBox => "searchbox",
            Self::Section => "section",
            Self::Separator => "separator",
            Self::Slider => "slider",
            Self::SpinButton => "spinbutton",
            Self::StaticText => "statictext",
            Self::Status => "status",
            Self::Strong => "strong",
            Self::Subscript => "subscript",
            Self::Superscript => "superscript",
            Self::Switch => "switch",
            Self::Tab => "tab",
            Self::TabList => "tablist",
            Self::TabPanel => "tabpanel",
            Self::Table => "table",
            Self::Term => "term",
            Self::Text => "text",
            Self::Textbox => "textbox",
            Self::Time => "time",
            Self::Timer => "timer",
            Self::ToggleButton => "togglebutton",
            Self::Toolbar => "toolbar",
            Self::Tooltip => "tooltip",
            Self::Tree => "tree",
            Self::TreeGrid => "treegrid",
            Self::TreeItem => "treeitem",
            Self::WebArea => "webarea",
        }
    }

    pub fn category(&self) -> NodeCategory {
        match self {
            Self::Button
            | Self::Checkbox
            | Self::Combobox
            | Self::Link
            | Self::ListBox
            | Self::MenuItem
            | Self::MenuItemCheckbox
            | Self::MenuItemRadio
            | Self::Option
            | Self::Radio
            | Self::RadioGroup
            | Self::SearchBox
            | Self::Slider
            | Self::SpinButton
            | Self::Switch
            | Self::Tab
            | Self::Textbox
            | Self::ToggleButton => NodeCategory::Interaction,

            Self::Blockquote
            | Self::Caption
            | Self::Definition
            | Self::Deletion
            | Self::Emphasis
            | Self::Heading
            | Self::Insertion
            | Self::LabelText
            | Self::Legend
            | Self::LineBreak
            | Self::Paragraph
            | Self::StaticText
            | Self::Strong
            | Self::Subscript
            | Self::Superscript
            | Self::Term
            | Self::Text
            | Self::Time => NodeCategory::Text,

            Self::DescriptionList
            | Self::DescriptionListDetail
            | Self::DescriptionListTerm
            | Self::Directory
            | Self::List
            | Self::ListItem
            | Self::ListMarker => NodeCategory::List,

            Self::Cell
            | Self::ColumnHeader
            | Self::Grid
            | Self::GridCell
            | Self::Row
            | Self::RowGroup
            | Self::RowHeader
            | Self::Table => NodeCategory::Table,

            Self::Tree | Self::TreeGrid | Self::TreeItem => NodeCategory::Tree,

            Self::Canvas | Self::Figure | Self::Image | Self::Img => NodeCategory::Image,

            Self::Code => NodeCategory::Code,

            Self::Alert
            | Self::AlertDialog
            | Self::Application
            | Self::Article
            | Self::Banner
            | Self::Complementary
            | Self::ContentInfo
            | Self::Dialog
            | Self::Document
            | Self::Feed
            | Self::Form
            | Self::Generic
            | Self::Group
            | Self::Iframe
            | Self::IframePresentational
            | Self::Log
            | Self::Main
            | Self::Marquee
            | Self::Menu
            | Self::MenuBar
            | Self::Navigation
            | Self::None
            | Self::Note
            | Self::Presentation
            | Self::Region
            | Self::RootWebArea
            | Self::Search
            | Self::Section
            | Self::Separator
            | Self::Status
            | Self::TabList
            | Self::TabPanel
            | Self::Timer
            | Self::Toolbar
            | Self::Tooltip
            | Self::WebArea => NodeCategory::Structural,

            Self::Math | Self::Meter | Self::ProgressBar | Self::ScrollBar => NodeCategory::Other,
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node's role as captured. Classification happens once, when the raw
/// payload is ingested; unknown strings are preserved verbatim rather than
/// coerced into a catch-all known role.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Role {
    Known(NodeRole),
    Unknown(String),
}

impl Role {
    pub fn from_raw(raw: &str) -> Self {
        match NodeRole::from_raw(raw) {
            Some(role) => Role::Known(role),
            None => Role::Unknown(raw.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Role::Known(_))
    }

    /// Category of the underlying role; `None` for unknown roles, which by
    /// construction have no category.
    pub fn category(&self) -> Option<NodeCategory> {
        match self {
            Role::Known(role) => Some(role.category()),
            Role::Unknown(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Role::Known(role) => role.as_str(),
            Role::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
