use std::error::Error;
use std::fmt::Display;

use ordered_float::FloatIsNan;

pub(crate) use clap::error::Error as ArgumentError;

#[derive(Debug)]
pub(crate) enum CommandError {
    MalformedInput(String),
    LayerNotFound(String),
    EmptyExtent,
    FloatIsNan,
    UnknownPlan(String),
    PlanFileRead(String),
    InputRead(String),
    OutputWrite(String),
    SchemaWrite(String),
}

impl Error for CommandError {

}

impl Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedInput(a) => write!(f,"Input is not a usable geometry document: {a}"),
            Self::LayerNotFound(a) => write!(f,"Layer '{a}' was not found in the input document."),
            Self::EmptyExtent => write!(f,"The layers to fit have no extent, there is nothing to scale to the canvas."),
            Self::FloatIsNan => write!(f,"A float was not a number."),
            Self::UnknownPlan(a) => write!(f,"There is no built-in render plan named '{a}'."),
            Self::PlanFileRead(a) => write!(f,"Error reading render plan: {a}"),
            Self::InputRead(a) => write!(f,"Error reading input: {a}"),
            Self::OutputWrite(a) => write!(f,"Error writing output: {a}"),
            Self::SchemaWrite(a) => write!(f,"Error writing documentation: {a}"),
        }
    }
}

impl From<FloatIsNan> for CommandError {

    fn from(_: FloatIsNan) -> Self {
        Self::FloatIsNan
    }

}

impl From<geojson::Error> for CommandError {

    fn from(value: geojson::Error) -> Self {
        Self::MalformedInput(format!("{value}"))
    }
}

impl From<topojson::Error> for CommandError {

    fn from(value: topojson::Error) -> Self {
        Self::MalformedInput(format!("{value}"))
    }
}

#[derive(Debug)]
pub(crate) enum ProgramError {
    ArgumentError(ArgumentError),
    CommandError(CommandError)
}

impl Error for ProgramError {

}

impl Display for ProgramError {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArgumentError(a) => write!(f,"{a}"),
            Self::CommandError(a) => write!(f,"{a}"),
        }
    }
}

impl From<ArgumentError> for ProgramError {

    fn from(value: ArgumentError) -> Self {
        Self::ArgumentError(value)
    }
}

impl From<CommandError> for ProgramError {

    fn from(value: CommandError) -> Self {
        Self::CommandError(value)
    }
}
