// SPDX-License-Identifier: MIT
//
// Renderers turn a ResolvedTheme into text for a downstream consumer.
// They only ever see resolved strings; nothing here touches the registry's
// ColorValues or the resolver.

pub mod css;
pub mod json;
