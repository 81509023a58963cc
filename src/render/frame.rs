use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{VizError, VizResult};

use super::{Element, ElementId, ElementOp};

/// Backend-agnostic content of one drawing surface.
///
/// Elements keep insertion order, which is also paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub elements: Vec<Element>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            elements: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, element: impl Into<Element>) -> Self {
        self.elements.push(element.into());
        self
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    pub fn extend<I, E>(&mut self, elements: I)
    where
        I: IntoIterator<Item = E>,
        E: Into<Element>,
    {
        self.elements.extend(elements.into_iter().map(Into::into));
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|element| element.id().as_str() == id)
    }

    /// Replaces the element with the same id, or appends it.
    pub fn upsert(&mut self, element: Element) {
        match self
            .elements
            .iter_mut()
            .find(|existing| existing.id() == element.id())
        {
            Some(existing) => *existing = element,
            None => self.elements.push(element),
        }
    }

    pub fn remove(&mut self, id: &ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|element| element.id() != id);
        self.elements.len() != before
    }

    /// Applies reconciliation ops in order.
    pub fn apply(&mut self, ops: &[ElementOp]) {
        for op in ops {
            match op {
                ElementOp::Create(element) | ElementOp::Update(element) => {
                    self.upsert(element.clone());
                }
                ElementOp::Remove(id) => {
                    self.remove(id);
                }
            }
        }
    }

    pub fn validate(&self) -> VizResult<()> {
        if !self.viewport.is_valid() {
            return Err(VizError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for (index, element) in self.elements.iter().enumerate() {
            element.validate()?;
            if self.elements[..index]
                .iter()
                .any(|earlier| earlier.id() == element.id())
            {
                return Err(VizError::InvalidData(format!(
                    "duplicate element id `{}`",
                    element.id()
                )));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn rects(&self) -> impl Iterator<Item = &super::RectPrimitive> {
        self.elements.iter().filter_map(|element| match element {
            Element::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &super::TextPrimitive> {
        self.elements.iter().filter_map(|element| match element {
            Element::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &super::CirclePrimitive> {
        self.elements.iter().filter_map(|element| match element {
            Element::Circle(circle) => Some(circle),
            _ => None,
        })
    }

    pub fn callouts(&self) -> impl Iterator<Item = &super::CalloutPrimitive> {
        self.elements.iter().filter_map(|element| match element {
            Element::Callout(callout) => Some(callout),
            _ => None,
        })
    }

    pub fn controls(&self) -> impl Iterator<Item = &super::ControlPrimitive> {
        self.elements.iter().filter_map(|element| match element {
            Element::Control(control) => Some(control),
            _ => None,
        })
    }

    pub fn axes(&self) -> impl Iterator<Item = &super::AxisPrimitive> {
        self.elements.iter().filter_map(|element| match element {
            Element::Axis(axis) => Some(axis),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RenderFrame;
    use crate::core::Viewport;
    use crate::render::{ElementId, ElementOp, RectPrimitive, TextHAlign, TextPrimitive, palette};

    #[test]
    fn duplicate_ids_fail_validation() {
        let frame = RenderFrame::new(Viewport::new(100, 100))
            .with(RectPrimitive::new("a", 0.0, 0.0, 1.0, 1.0, palette::BAR))
            .with(TextPrimitive::new("a", "x", 0.0, 0.0, 12.0, TextHAlign::Left));
        assert!(frame.validate().is_err());
    }

    #[test]
    fn ops_update_in_place_and_remove() {
        let mut frame = RenderFrame::new(Viewport::new(100, 100))
            .with(RectPrimitive::new("a", 0.0, 0.0, 1.0, 1.0, palette::BAR))
            .with(RectPrimitive::new("b", 0.0, 5.0, 1.0, 1.0, palette::BAR));
        frame.apply(&[
            ElementOp::Update(RectPrimitive::new("a", 0.0, 10.0, 4.0, 1.0, palette::BAR).into()),
            ElementOp::Remove(ElementId::new("b")),
        ]);

        assert_eq!(frame.len(), 1);
        let a = frame.rects().next().expect("rect a");
        assert_eq!(a.y, 10.0);
        assert_eq!(a.width, 4.0);
    }
}
